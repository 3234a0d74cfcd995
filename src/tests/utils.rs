use crate::config::AppConfig;
use astra::{Body, Request, Response};
use http::Method;
use serde_json::Value;
use std::io::Read;

/// Default config, with a small body limit so size checks are cheap to hit.
pub fn test_config() -> AppConfig {
    AppConfig {
        max_body_bytes: 16 * 1024,
        max_candidates: 20,
        ..AppConfig::default()
    }
}

pub fn post_json(path: &str, body: &Value) -> Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn read_json(resp: Response) -> Value {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("not JSON ({e}): {body}"))
}

/// A candidate in the shape the vector store hands over.
pub fn candidate(
    title: &str,
    city: &str,
    price: u64,
    sqft: u64,
    beds: u32,
    baths: u32,
    amenities: &[&str],
) -> Value {
    serde_json::json!({
        "title": title,
        "location": city,
        "price": price,
        "square_feet": sqft,
        "number_of_bedrooms": beds,
        "number_of_bathrooms": baths,
        "amenities": amenities,
        "description": format!("{title} in {city}"),
    })
}
