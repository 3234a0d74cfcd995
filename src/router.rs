use crate::config::AppConfig;
use crate::errors::ServerError;
use crate::handlers;
use crate::responses::{error_to_response, json_response, ResultResp};
use astra::{Request, Response};
use serde_json::json;
use std::time::Instant;
use tracing::{error, info, warn};

pub fn handle(req: Request, config: &AppConfig) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    match (method.as_str(), path.as_str()) {
        ("GET", "/health") => json_response(200, &json!({ "status": "ok" })),
        ("POST", "/rank") => handlers::rank::rank_listings(req, config),
        ("POST", "/preferences") => handlers::preferences::parse_preferences(req, config),

        (_, "/health" | "/rank" | "/preferences") => Err(ServerError::MethodNotAllowed),
        _ => Err(ServerError::NotFound),
    }
}

/// Runs `handle`, renders any error, and logs one line per request.
pub fn respond(req: Request, config: &AppConfig) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let resp = match handle(req, config) {
        Ok(resp) => resp,
        Err(err) => {
            if err.status() >= 500 {
                error!(%method, %path, "request failed: {err}");
            } else {
                warn!(%method, %path, "request rejected: {err}");
            }
            error_to_response(err)
        }
    };

    info!(
        %method,
        %path,
        status = resp.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "handled request"
    );
    resp
}
