// src/domain/rerank.rs

use crate::domain::listing::{normalize_tags, Listing, Preference, ScoredListing};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

pub const CITY_BONUS: f64 = 5.0;
pub const PRICE_WEIGHT: f64 = 3.0;
pub const SQUARE_FEET_WEIGHT: f64 = 2.0;
pub const ROOM_MATCH_POINTS: f64 = 1.0;
pub const AMENITY_POINTS: f64 = 0.5;

pub const DEFAULT_TOP_N: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum RankError {
    InvalidInput(String),
}

impl fmt::Display for RankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
        }
    }
}

impl std::error::Error for RankError {}

/// Preferences prepared once per ranking pass so the per-listing loop
/// does not re-normalize them.
struct Criteria<'p> {
    city: Option<String>,
    prefs: &'p Preference,
    amenities: BTreeSet<String>,
}

impl<'p> Criteria<'p> {
    fn new(prefs: &'p Preference) -> Self {
        let city = prefs
            .city
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty());

        Self {
            city,
            prefs,
            amenities: normalize_tags(&prefs.desired_amenities),
        }
    }

    fn score(&self, listing: &Listing) -> f64 {
        let mut score = 0.0;

        // 1. City
        if let Some(city) = &self.city {
            if listing.city.trim().to_lowercase() == *city {
                score += CITY_BONUS;
            }
        }

        // 2. Budget
        score += closeness(listing.price, self.prefs.budget, PRICE_WEIGHT);

        // 3. Square footage
        score += closeness(
            listing.square_feet,
            self.prefs.desired_square_feet,
            SQUARE_FEET_WEIGHT,
        );

        // 4. Bedroom count
        if self.prefs.desired_bedrooms == Some(listing.bedrooms) {
            score += ROOM_MATCH_POINTS;
        }

        // 5. Bathroom count
        if self.prefs.desired_bathrooms == Some(listing.bathrooms) {
            score += ROOM_MATCH_POINTS;
        }

        // 6. Amenities
        if !self.amenities.is_empty() {
            let matched = listing
                .amenity_set()
                .intersection(&self.amenities)
                .count();
            score += matched as f64 * AMENITY_POINTS;
        }

        score
    }
}

/// `max(0, weight - |actual - target| / target)`, or 0 when the target is
/// unset or not a positive number.
fn closeness(actual: f64, target: Option<f64>, weight: f64) -> f64 {
    match target {
        Some(target) if target.is_finite() && target > 0.0 => {
            let diff = (actual - target).abs();
            (weight - diff / target).max(0.0)
        }
        _ => 0.0,
    }
}

/// Score of a single listing against the given preferences.
pub fn score_listing(prefs: &Preference, listing: &Listing) -> f64 {
    Criteria::new(prefs).score(listing)
}

/// Scores every candidate, sorts by score descending and keeps the first
/// `top_n`. Candidates with equal scores keep their input order, so the
/// similarity-search rank acts as the tie-break.
pub fn rank_scored<'a>(
    prefs: &Preference,
    candidates: &'a [Listing],
    top_n: usize,
) -> Result<Vec<ScoredListing<'a>>, RankError> {
    if top_n == 0 {
        return Err(RankError::InvalidInput(
            "top_n must be a positive integer".to_string(),
        ));
    }

    for (i, listing) in candidates.iter().enumerate() {
        listing
            .validate()
            .map_err(|msg| RankError::InvalidInput(format!("candidate {i}: {msg}")))?;
    }

    let criteria = Criteria::new(prefs);
    let mut scored: Vec<ScoredListing<'a>> = candidates
        .iter()
        .map(|listing| ScoredListing {
            score: criteria.score(listing),
            listing,
        })
        .collect();

    // `sort_by` is stable.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_n);

    debug!(
        candidates = candidates.len(),
        returned = scored.len(),
        top_score = scored.first().map(|s| s.score),
        "reranked candidates"
    );

    Ok(scored)
}

/// Same ordering as [`rank_scored`], without the scores.
pub fn rank<'a>(
    prefs: &Preference,
    candidates: &'a [Listing],
    top_n: usize,
) -> Result<Vec<&'a Listing>, RankError> {
    Ok(rank_scored(prefs, candidates, top_n)?
        .into_iter()
        .map(|s| s.listing)
        .collect())
}
