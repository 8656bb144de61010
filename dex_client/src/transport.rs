use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query.push((name.to_string(), value.into()));
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }
}

/// Status code plus the decoded body. The body is untyped on purpose:
/// decoding into records happens in the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A 2xx body must be JSON. Error pages are often HTML, so a non-success
/// body that does not parse is kept as `Null` and the status decides.
pub fn decode_body(status: u16, text: &str) -> Result<serde_json::Value, TransportError> {
    match serde_json::from_str(text) {
        Ok(body) => Ok(body),
        Err(source) if (200..300).contains(&status) => {
            Err(TransportError::Decode { status, source })
        }
        Err(_) => Ok(serde_json::Value::Null),
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout_seconds: u64) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self { client })
    }

    fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                TransportError::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| TransportError::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        let response = builder
            .headers(Self::header_map(&request.headers)?)
            .query(&request.query)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!("{:?} {} -> HTTP {}", request.method, request.url, status);

        let body = decode_body(status, &text)?;
        Ok(HttpResponse { status, body })
    }
}
