use astra::Response;
// errors.rs
use std::fmt;

use crate::domain::rerank::RankError;

/// Errors originating from either the server logic
/// (routing, request decoding, etc.) or the ranking core.
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    MethodNotAllowed,
    BadRequest(String),
    InvalidInput(String),
    PayloadTooLarge(usize),
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    /// HTTP status code the error renders with.
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::MethodNotAllowed => 405,
            ServerError::BadRequest(_) => 400,
            ServerError::InvalidInput(_) => 400,
            ServerError::PayloadTooLarge(_) => 413,
            ServerError::InternalError => 500,
        }
    }

    /// Short machine-readable name used in JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::NotFound => "not_found",
            ServerError::MethodNotAllowed => "method_not_allowed",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::InvalidInput(_) => "invalid_input",
            ServerError::PayloadTooLarge(_) => "payload_too_large",
            ServerError::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::InvalidInput(msg) => write!(f, "Invalid Input: {msg}"),
            ServerError::PayloadTooLarge(limit) => {
                write!(f, "Payload Too Large: body exceeds {limit} bytes")
            }
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<RankError> for ServerError {
    fn from(err: RankError) -> Self {
        match err {
            RankError::InvalidInput(msg) => ServerError::InvalidInput(msg),
        }
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::InvalidInput(format!("malformed JSON: {err}"))
    }
}
