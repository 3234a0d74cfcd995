pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod responses;
pub mod router;

pub use domain::{rank, rank_scored, score_listing, Listing, Preference, RankError};
