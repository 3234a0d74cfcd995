pub mod preferences;
pub mod rank;

use crate::errors::ServerError;
use astra::Request;
use std::io::Read;

/// Reads the whole request body, refusing anything over `limit` bytes.
pub fn read_body(req: Request, limit: usize) -> Result<Vec<u8>, ServerError> {
    let mut body = req.into_body();
    let mut buf = Vec::new();

    body.reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Failed to read body: {e}")))?;

    if buf.len() > limit {
        return Err(ServerError::PayloadTooLarge(limit));
    }
    Ok(buf)
}

/// True when the request declares `application/x-www-form-urlencoded`.
pub fn is_form_encoded(req: &Request) -> bool {
    req.headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<mime::Mime>().ok())
        .map(|m| m.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str())
        .unwrap_or(false)
}
