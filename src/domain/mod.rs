pub mod listing;
pub mod preferences;
pub mod rerank;

pub use listing::{Listing, Preference, ScoredListing};
pub use preferences::SearchInputs;
pub use rerank::{rank, rank_scored, score_listing, RankError};
