#![allow(dead_code)]

use async_trait::async_trait;
use dex_client::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub const WSOL: &str = "So11111111111111111111111111111111111111112";
pub const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const BONK: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

/// Returns a canned response and records every request it receives
#[derive(Clone)]
pub struct SpyTransport {
    status: u16,
    body: Value,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl SpyTransport {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for SpyTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

pub fn addresses(list: &[&str]) -> Vec<String> {
    list.iter().map(|a| a.to_string()).collect()
}
