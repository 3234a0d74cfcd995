use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// A generated real-estate listing as handed over by the vector store.
///
/// Accepts the store's metadata names (`location`, `number_of_bedrooms`,
/// `number_of_bathrooms`) as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(alias = "location")]
    pub city: String,
    pub price: f64,
    pub square_feet: f64,
    #[serde(alias = "number_of_bedrooms")]
    pub bedrooms: u32,
    #[serde(alias = "number_of_bathrooms")]
    pub bathrooms: u32,

    // Either a JSON list, or a string holding a JSON list / comma-separated tags.
    #[serde(default, deserialize_with = "amenities_from_any")]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood_description: Option<String>,
}

impl Listing {
    /// Checks the numeric fields the scorer reads.
    pub fn validate(&self) -> Result<(), String> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("price must be a non-negative number, got {}", self.price));
        }
        if !self.square_feet.is_finite() || self.square_feet < 0.0 {
            return Err(format!(
                "square_feet must be a non-negative number, got {}",
                self.square_feet
            ));
        }
        Ok(())
    }

    /// Normalized amenity tags, see [`normalize_tag`].
    pub fn amenity_set(&self) -> BTreeSet<String> {
        normalize_tags(&self.amenities)
    }
}

/// What a user is looking for. Every field is optional; unset fields
/// contribute nothing to a listing's score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preference {
    pub city: Option<String>,
    pub budget: Option<f64>,
    pub desired_square_feet: Option<f64>,
    pub desired_bedrooms: Option<u32>,
    pub desired_bathrooms: Option<u32>,
    pub desired_amenities: BTreeSet<String>,
}

/// A listing paired with the score it got in one ranking pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredListing<'a> {
    pub score: f64,
    pub listing: &'a Listing,
}

/// Lowercases a tag and collapses inner whitespace: `"  Swimming   Pool "` -> `"swimming pool"`.
pub fn normalize_tag(tag: &str) -> String {
    tag.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn normalize_tags<'a, I>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    tags.into_iter()
        .map(|t| normalize_tag(t))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Splits a comma-separated list, dropping empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn amenities_from_any<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(de::Error::custom(format!(
                    "amenity must be a string, got {other}"
                ))),
            })
            .collect(),
        Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.starts_with('[') {
                if let Ok(list) = serde_json::from_str::<Vec<String>>(trimmed) {
                    return Ok(list);
                }
            }
            Ok(split_list(trimmed))
        }
        other => Err(de::Error::custom(format!(
            "amenities must be a list or a string, got {other}"
        ))),
    }
}
