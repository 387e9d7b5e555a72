//! Combine term vectors into one query or item vector

use crate::core::Embedding;
use crate::error::{Error, Result};

use super::TermResolver;

/// How resolved vectors are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionMode {
	/// Component-wise sum; magnitude grows with the number of signals
	Sum,
	/// Component-wise mean over resolved terms
	Mean,
}

/// A composed vector and the terms that did or did not contribute
#[derive(Debug, Clone)]
pub struct Composition {
	pub vector: Embedding,
	pub resolved: Vec<String>,
	pub unresolved: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct VectorComposer<'a> {
	resolver: TermResolver<'a>,
}

impl<'a> VectorComposer<'a> {
	pub fn new(resolver: TermResolver<'a>) -> Self {
		Self { resolver }
	}

	/// Compose `terms` with `mode`. Fails with [`Error::EmptyComposition`]
	/// when no term resolves, never with a zero vector.
	pub fn compose<I, S>(&self, terms: I, mode: CompositionMode) -> Result<Composition>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut resolution = self.resolver.resolve_all(terms);

		if resolution.resolved.is_empty() {
			return Err(Error::EmptyComposition {
				terms: resolution.unresolved,
			});
		}

		// Fixed summation order keeps the float result independent of input order
		resolution.resolved.sort_by(|a, b| a.0.cmp(&b.0));

		let dimension = self.resolver.table().dimension();
		let mut accumulator = vec![0.0f64; dimension];
		for (term, embedding) in &resolution.resolved {
			if embedding.dimension() != dimension {
				crate::ui::debug(&format!("'{}' has dimension {}", term, embedding.dimension()));
				return Err(Error::DimensionMismatch {
					expected: dimension,
					actual: embedding.dimension(),
				});
			}
			for (acc, value) in accumulator.iter_mut().zip(embedding.as_slice()) {
				*acc += f64::from(*value);
			}
		}

		let count = resolution.resolved.len() as f64;
		let vector = accumulator
			.into_iter()
			.map(|sum| match mode {
				CompositionMode::Sum => sum as f32,
				CompositionMode::Mean => (sum / count) as f32,
			})
			.collect();

		Ok(Composition {
			vector: Embedding::new(vector),
			resolved: resolution.resolved.into_iter().map(|(term, _)| term).collect(),
			unresolved: resolution.unresolved,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::embeddings::{EmbeddingTable, MalformedPolicy};

	fn table() -> EmbeddingTable {
		let source = "herbaceous 1 0 2\ncabernet 0 1 4\nrioja 0.25 0.5 -1\n";
		EmbeddingTable::from_reader(source.as_bytes(), MalformedPolicy::Abort, None)
			.unwrap()
			.0
	}

	#[test]
	fn mean_divides_by_resolved_count() {
		let table = table();
		let composer = VectorComposer::new(TermResolver::new(&table));
		let composition = composer
			.compose(["herbaceous", "cabernet", "unknown"], CompositionMode::Mean)
			.unwrap();

		assert_eq!(composition.vector.as_slice(), &[0.5, 0.5, 3.0]);
		assert_eq!(composition.resolved, vec!["cabernet", "herbaceous"]);
		assert_eq!(composition.unresolved, vec!["unknown"]);
	}

	#[test]
	fn sum_keeps_repeated_signals() {
		let table = table();
		let composer = VectorComposer::new(TermResolver::new(&table));
		let composition = composer
			.compose(["herbaceous", "Herbaceous"], CompositionMode::Sum)
			.unwrap();
		assert_eq!(composition.vector.as_slice(), &[2.0, 0.0, 4.0]);
	}

	#[test]
	fn sum_is_deterministic_and_distinguishes_terms() {
		let table = table();
		let composer = VectorComposer::new(TermResolver::new(&table));

		let herbaceous = composer.compose(["herbaceous"], CompositionMode::Sum).unwrap();
		let cabernet = composer.compose(["cabernet"], CompositionMode::Sum).unwrap();
		assert_eq!(herbaceous.vector.dimension(), table.dimension());
		assert_eq!(cabernet.vector.dimension(), table.dimension());
		assert_ne!(herbaceous.vector, cabernet.vector);

		let bits = |c: &Composition| c.vector.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
		let first = composer.compose(["rioja", "cabernet"], CompositionMode::Sum).unwrap();
		let second = composer.compose(["rioja", "cabernet"], CompositionMode::Sum).unwrap();
		assert_eq!(bits(&first), bits(&second));
	}

	#[test]
	fn order_does_not_change_bits() {
		let table = table();
		let composer = VectorComposer::new(TermResolver::new(&table));
		let a = composer.compose(["rioja", "cabernet", "herbaceous"], CompositionMode::Mean).unwrap();
		let b = composer.compose(["herbaceous", "rioja", "cabernet"], CompositionMode::Mean).unwrap();

		let bits = |c: &Composition| c.vector.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
		assert_eq!(bits(&a), bits(&b));
	}

	#[test]
	fn nothing_resolved_is_an_error() {
		let table = table();
		let composer = VectorComposer::new(TermResolver::new(&table));

		let err = composer.compose(["velvety"], CompositionMode::Sum).unwrap_err();
		assert!(matches!(err, Error::EmptyComposition { ref terms } if terms == &["velvety"]));

		let empty: [&str; 0] = [];
		let err = composer.compose(empty, CompositionMode::Mean).unwrap_err();
		assert!(matches!(err, Error::EmptyComposition { .. }));
	}
}
