use crate::config::AppConfig;
use crate::domain::{Preference, SearchInputs};
use crate::handlers::{is_form_encoded, read_body};
use crate::responses::{json_response, ResultResp};
use astra::Request;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct PreferencesResponse {
    preferences: Preference,
    query: String,
}

/// POST /preferences
///
/// Parses the raw search form (JSON or url-encoded) into structured
/// preferences plus the query text for the similarity search.
pub fn parse_preferences(req: Request, config: &AppConfig) -> ResultResp {
    let form = is_form_encoded(&req);
    let body = read_body(req, config.max_body_bytes)?;

    let inputs = if form {
        SearchInputs::from_pairs(url::form_urlencoded::parse(&body).into_owned())
    } else {
        serde_json::from_slice::<SearchInputs>(&body)?
    };

    let preferences = inputs.to_preference();
    info!(form, city = ?preferences.city, "parsed search preferences");

    json_response(
        200,
        &PreferencesResponse {
            preferences,
            query: inputs.to_query_text(),
        },
    )
}
