//! Content fingerprint of a term vocabulary

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

/// xxh3 over the sorted, newline-joined vocabulary. Two catalogs with the
/// same distinct terms share a fingerprint regardless of row order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VocabularyFingerprint(String);

impl VocabularyFingerprint {
	/// Fingerprint of an already sorted, deduplicated term sequence
	pub fn compute<'a, I>(sorted_terms: I) -> Self
	where
		I: IntoIterator<Item = &'a str>,
	{
		let mut buffer = Vec::new();
		for term in sorted_terms {
			buffer.extend_from_slice(term.as_bytes());
			buffer.push(b'\n');
		}

		let hash = xxh3_64(&buffer);
		Self(format!("{:016x}", hash))
	}

	pub fn from_stored(value: String) -> Self {
		Self(value)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn short(&self) -> &str {
		self.0.get(..8).unwrap_or(&self.0)
	}
}

impl std::fmt::Display for VocabularyFingerprint {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}
