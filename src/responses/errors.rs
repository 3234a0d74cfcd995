use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

pub use crate::errors::ResultResp;

/// Convert a ServerError into a JSON error response
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status();
    let body = json!({
        "error": err.kind(),
        "message": err.to_string(),
    });

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
