//! Core domain types

pub mod embedding;
pub mod hash;
pub mod term;
pub mod wine;

pub use embedding::Embedding;
pub use hash::VocabularyFingerprint;
pub use wine::{Wine, WineId};
