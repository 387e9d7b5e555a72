//! SQLite-backed catalog, resolved term subset and item vectors

pub mod catalog;
pub mod database;
pub mod meta;
pub mod terms;
pub mod vectors;

pub use catalog::UniqueAttributes;
pub use database::{Database, Rebuild};
pub use meta::IngestionManifest;
