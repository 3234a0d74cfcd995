use crate::config::AppConfig;
use crate::domain::{rank_scored, Listing, Preference, SearchInputs};
use crate::errors::ServerError;
use crate::handlers::read_body;
use crate::responses::{json_response, ResultResp};
use astra::Request;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    /// Already structured preferences.
    #[serde(default)]
    pub preferences: Option<Preference>,
    /// Raw search form; parsed the same way as POST /preferences.
    #[serde(default)]
    pub inputs: Option<SearchInputs>,
    /// Similarity-search results, best match first.
    pub candidates: Vec<Listing>,
    #[serde(default)]
    pub top_n: Option<i64>,
}

#[derive(Debug, Serialize)]
struct RankedEntry<'a> {
    rank: usize,
    score: f64,
    listing: &'a Listing,
}

#[derive(Debug, Serialize)]
struct RankResponse<'a> {
    top_n: usize,
    candidates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
    results: Vec<RankedEntry<'a>>,
}

/// POST /rank
pub fn rank_listings(req: Request, config: &AppConfig) -> ResultResp {
    let body = read_body(req, config.max_body_bytes)?;
    let request: RankRequest = serde_json::from_slice(&body)?;

    if request.candidates.len() > config.max_candidates {
        return Err(ServerError::BadRequest(format!(
            "at most {} candidates per request, got {}",
            config.max_candidates,
            request.candidates.len()
        )));
    }

    let (preferences, query) = match (request.preferences, request.inputs) {
        (Some(_), Some(_)) => {
            return Err(ServerError::BadRequest(
                "send either preferences or inputs, not both".to_string(),
            ))
        }
        (Some(prefs), None) => (prefs, None),
        (None, Some(inputs)) => (inputs.to_preference(), Some(inputs.to_query_text())),
        (None, None) => (Preference::default(), None),
    };

    let top_n = match request.top_n {
        None => config.default_top_n,
        // Zero is rejected by the ranker itself.
        Some(n) => usize::try_from(n).map_err(|_| {
            ServerError::InvalidInput(format!("top_n must be a positive integer, got {n}"))
        })?,
    };

    let ranked = rank_scored(&preferences, &request.candidates, top_n)?;

    info!(
        candidates = request.candidates.len(),
        top_n,
        returned = ranked.len(),
        "ranked listings"
    );

    let results = ranked
        .into_iter()
        .enumerate()
        .map(|(i, s)| RankedEntry {
            rank: i + 1,
            score: s.score,
            listing: s.listing,
        })
        .collect();

    json_response(
        200,
        &RankResponse {
            top_n,
            candidates: request.candidates.len(),
            query,
            results,
        },
    )
}
