use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },

    #[error("Undecodable response body (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by the price clients. None of them are retried.
#[derive(Error, Debug)]
pub enum PriceClientError {
    #[error("No tokens provided")]
    NoPositions,

    #[error("Invalid token address: {address}")]
    InvalidAddress { address: String },

    #[error("Invalid tokens: {reason}")]
    InvalidTokens { reason: String },

    #[error("Missing field in response: {field}")]
    MissingField { field: String },

    #[error("Malformed number in field {field}: {value}")]
    MalformedNumber { field: String, value: String },

    #[error("Field {field} has the wrong type: {value}")]
    WrongType { field: String, value: String },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl PriceClientError {
    pub(crate) fn invalid_tokens(reason: impl Into<String>) -> Self {
        Self::InvalidTokens {
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_field(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    pub(crate) fn malformed_number(field: &str, value: impl ToString) -> Self {
        Self::MalformedNumber {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn wrong_type(field: &str, value: impl ToString) -> Self {
        Self::WrongType {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PriceClientError>;
