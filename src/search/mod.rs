//! Query composition, ranking and the recommendation endpoint

pub mod api;
pub mod ranker;
pub mod recommend;

pub use api::{handle, ApiResponse, RecommendRequest};
pub use ranker::{FullScanRanker, Ranker, Similarity, TopK};
pub use recommend::{Match, Recommendation, Recommender};
