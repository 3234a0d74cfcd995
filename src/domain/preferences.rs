// src/domain/preferences.rs

use crate::domain::listing::{split_list, Preference};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

// The count must not follow a digit or a dot, so "2.5 baths" is read as 2.5, never 5.
static BEDROOMS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^\d.])(\d+(?:\.\d+)?)\s*-?\s*(?:bedrooms?|beds?|br|bd)\b")
        .expect("valid bedrooms regex")
});

static BATHROOMS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^\d.])(\d+(?:\.\d+)?)\s*-?\s*(?:bathrooms?|baths?|ba)\b")
        .expect("valid bathrooms regex")
});

/// Raw search form, one string per field as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchInputs {
    pub square_feet: Option<String>,
    pub city: Option<String>,
    pub budget: Option<String>,
    /// Free text such as "3 bedrooms, 2 baths and a big kitchen".
    pub features: Option<String>,
    /// Comma-separated.
    pub amenities: Option<String>,
    /// Comma-separated.
    pub neighborhoods: Option<String>,
}

impl SearchInputs {
    /// Builds inputs from decoded form pairs; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut inputs = SearchInputs::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "square_feet" => &mut inputs.square_feet,
                "city" => &mut inputs.city,
                "budget" => &mut inputs.budget,
                "features" => &mut inputs.features,
                "amenities" => &mut inputs.amenities,
                "neighborhoods" => &mut inputs.neighborhoods,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        inputs
    }

    /// Structured preferences. Fields that are empty or do not parse stay unset.
    pub fn to_preference(&self) -> Preference {
        let features = present(&self.features);

        Preference {
            city: present(&self.city).map(|c| c.to_string()),
            budget: present(&self.budget).and_then(|v| parse_number("budget", v)),
            desired_square_feet: present(&self.square_feet)
                .and_then(|v| parse_number("square_feet", v)),
            desired_bedrooms: features
                .and_then(|f| capture_count("bedrooms", &BEDROOMS_RE, f)),
            desired_bathrooms: features
                .and_then(|f| capture_count("bathrooms", &BATHROOMS_RE, f)),
            desired_amenities: present(&self.amenities)
                .map(split_list)
                .unwrap_or_default()
                .into_iter()
                .collect(),
        }
    }

    /// Free-text query for the similarity search, one sentence per present field.
    pub fn to_query_text(&self) -> String {
        let mut parts = Vec::new();

        if let Some(sqft) = present(&self.square_feet) {
            parts.push(format!("I want a house of around {sqft} sq ft."));
        }
        if let Some(city) = present(&self.city) {
            parts.push(format!("My preferred city is {city}."));
        }
        if let Some(budget) = present(&self.budget) {
            parts.push(format!("My budget is around {budget}."));
        }
        if let Some(features) = present(&self.features) {
            parts.push(format!("I'm looking for features like: {features}."));
        }
        if let Some(amenities) = present(&self.amenities) {
            parts.push(format!(
                "I want amenities like: {}.",
                split_list(amenities).join(", ")
            ));
        }
        if let Some(neighborhoods) = present(&self.neighborhoods) {
            parts.push(format!(
                "My preferred neighborhoods are: {}.",
                split_list(neighborhoods).join(", ")
            ));
        }

        parts.join("\n")
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Keeps digits and dots only, so "$400,000" parses as 400000.
fn parse_number(field: &str, raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            warn!(field, value = raw, "could not parse number, leaving preference unset");
            None
        }
    }
}

/// Whole room count, or unset when the text gives a fractional one.
fn capture_count(field: &str, re: &Regex, text: &str) -> Option<u32> {
    let raw = re.captures(text)?.get(1)?.as_str();

    match raw.parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!(
                field,
                value = raw,
                "room count is not a whole number, leaving preference unset"
            );
            None
        }
    }
}
