//! Term lookup against an embedding table

use crate::core::term;
use crate::core::Embedding;

use super::EmbeddingTable;

/// Outcome of resolving a batch of terms
#[derive(Debug, Default)]
pub struct Resolution<'a> {
	/// Normalized term and its vector, in input order
	pub resolved: Vec<(String, &'a Embedding)>,
	/// Terms without a vector, as supplied
	pub unresolved: Vec<String>,
}

/// Case-insensitive lookup that never fails on a missing term
#[derive(Debug, Clone, Copy)]
pub struct TermResolver<'a> {
	table: &'a EmbeddingTable,
}

impl<'a> TermResolver<'a> {
	pub fn new(table: &'a EmbeddingTable) -> Self {
		Self { table }
	}

	pub fn table(&self) -> &'a EmbeddingTable {
		self.table
	}

	pub fn resolve(&self, term: &str) -> Option<&'a Embedding> {
		self.table.get(&term::normalize(term))
	}

	pub fn resolve_all<I, S>(&self, terms: I) -> Resolution<'a>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut resolution = Resolution::default();
		for raw in terms {
			let raw = raw.as_ref();
			let normalized = term::normalize(raw);
			match self.table.get(&normalized) {
				Some(embedding) => resolution.resolved.push((normalized, embedding)),
				None => resolution.unresolved.push(raw.to_string()),
			}
		}
		resolution
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::embeddings::MalformedPolicy;

	fn table() -> EmbeddingTable {
		let source = "herbaceous 1 0\ncabernet 0 1\n";
		EmbeddingTable::from_reader(source.as_bytes(), MalformedPolicy::Abort, None)
			.unwrap()
			.0
	}

	#[test]
	fn resolves_case_insensitively() {
		let table = table();
		let resolver = TermResolver::new(&table);
		assert_eq!(resolver.resolve("Cabernet"), resolver.resolve("cabernet"));
		assert!(resolver.resolve("CABERNET").is_some());
	}

	#[test]
	fn repeated_resolution_is_bit_identical() {
		let table = table();
		let resolver = TermResolver::new(&table);
		let first: Vec<u32> = resolver.resolve("herbaceous").unwrap().as_slice().iter().map(|v| v.to_bits()).collect();
		let second: Vec<u32> = resolver.resolve("HERBACEOUS").unwrap().as_slice().iter().map(|v| v.to_bits()).collect();
		assert_eq!(first, second);
	}

	#[test]
	fn missing_terms_are_collected() {
		let table = table();
		let resolution = TermResolver::new(&table).resolve_all(["cabernet", "Velvety", " herbaceous"]);
		assert_eq!(resolution.resolved.len(), 1);
		assert_eq!(resolution.unresolved, vec!["Velvety", " herbaceous"]);
	}
}
