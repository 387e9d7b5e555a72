//! # Sommelier Library
//!
//! Wine recommendations from GloVe word vectors. Catalog attributes are
//! composed into per-wine vectors offline; free-form preference terms are
//! composed into a query at request time and ranked by cosine similarity.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod embeddings;
pub mod error;
pub mod processing;
pub mod search;
pub mod storage;
pub mod ui;

pub use error::{Error, Result};
