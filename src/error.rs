//! Error taxonomy shared by the engine
//!
//! Unresolved terms are deliberately absent: a term missing from the
//! embedding table is an expected outcome, reported as data through
//! `Composition::unresolved` and `CoverageReport::unresolved`.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	/// Embedding source could not be opened or read
	#[error("embedding source unavailable at {}: {source}", path.display())]
	SourceUnavailable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A line of the embedding source could not be parsed
	#[error("malformed embedding entry at line {line}: {reason}")]
	MalformedEntry { line: usize, reason: String },

	/// None of the supplied terms resolved to a vector
	#[error("no resolvable terms among [{}]", terms.join(", "))]
	EmptyComposition { terms: Vec<String> },

	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	#[error("vector dimension mismatch: expected {expected}, got {actual}")]
	DimensionMismatch { expected: usize, actual: usize },

	#[error("store unavailable: {0}")]
	StoreUnavailable(#[from] rusqlite::Error),

	#[error("corrupt store value: {0}")]
	CorruptStore(String),
}

impl Error {
	/// Errors caused by the caller's input rather than by the system
	pub fn is_client_error(&self) -> bool {
		matches!(self, Error::InvalidArgument(_) | Error::EmptyComposition { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn classifies_client_errors() {
		assert!(Error::InvalidArgument("k".into()).is_client_error());
		assert!(Error::EmptyComposition { terms: vec![] }.is_client_error());
		assert!(!Error::CorruptStore("blob".into()).is_client_error());
		assert!(!Error::DimensionMismatch { expected: 2, actual: 3 }.is_client_error());
	}

	#[test]
	fn empty_composition_lists_terms() {
		let err = Error::EmptyComposition {
			terms: vec!["velvety".into(), "zesty".into()],
		};
		assert_eq!(err.to_string(), "no resolvable terms among [velvety, zesty]");
	}
}
