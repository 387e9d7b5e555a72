//! Term embeddings: loading, lookup and composition

pub mod composer;
pub mod resolver;
pub mod table;

pub use composer::{Composition, CompositionMode, VectorComposer};
pub use resolver::{Resolution, TermResolver};
pub use table::{EmbeddingTable, LoadReport, MalformedLine, MalformedPolicy};
