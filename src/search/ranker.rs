//! Cosine ranking of catalog vectors against a query

use rayon::prelude::*;
use serde::Serialize;

use crate::core::{Embedding, WineId};
use crate::error::{Error, Result};
use crate::ui;

/// Positive number of results to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopK(usize);

impl TopK {
	/// Rejects zero and negative counts
	pub fn new(k: i64) -> Result<Self> {
		if k <= 0 {
			return Err(Error::InvalidArgument(format!(
				"result count must be a positive integer, got {}",
				k
			)));
		}
		usize::try_from(k)
			.map(Self)
			.map_err(|_| Error::InvalidArgument(format!("result count {} is too large", k)))
	}

	pub fn get(self) -> usize {
		self.0
	}
}

/// Score of one catalog item
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Similarity {
	pub wine_id: WineId,
	/// Cosine similarity in [-1.0, 1.0]
	pub similarity: f32,
}

/// Anything that can order catalog items by closeness to a query vector
pub trait Ranker: Send + Sync {
	fn rank(&self, query: &Embedding, top_k: TopK) -> Result<Vec<Similarity>>;

	/// Number of rankable items
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Exhaustive scan over a read-only snapshot of item vectors
#[derive(Debug, Clone)]
pub struct FullScanRanker {
	/// Unit-length item vectors; zero vectors are dropped at construction
	items: Vec<(WineId, Embedding)>,
	dimension: Option<usize>,
}

impl FullScanRanker {
	pub fn new(items: Vec<(WineId, Embedding)>) -> Result<Self> {
		let dimension = items.first().map(|(_, embedding)| embedding.dimension());
		let mut units = Vec::with_capacity(items.len());

		for (wine_id, embedding) in items {
			if let Some(expected) = dimension {
				if embedding.dimension() != expected {
					return Err(Error::DimensionMismatch {
						expected,
						actual: embedding.dimension(),
					});
				}
			}
			match embedding.normalized() {
				Some(unit) => units.push((wine_id, unit)),
				None => ui::debug(&format!("Wine {} has a zero vector, excluded from ranking", wine_id)),
			}
		}

		Ok(Self {
			items: units,
			dimension,
		})
	}
}

impl Ranker for FullScanRanker {
	fn rank(&self, query: &Embedding, top_k: TopK) -> Result<Vec<Similarity>> {
		if let Some(expected) = self.dimension {
			if query.dimension() != expected {
				return Err(Error::DimensionMismatch {
					expected,
					actual: query.dimension(),
				});
			}
		}

		let query = query
			.normalized()
			.ok_or_else(|| Error::InvalidArgument("query vector has zero magnitude".to_string()))?;

		let mut scored: Vec<Similarity> = self
			.items
			.par_iter()
			.map(|(wine_id, unit)| Similarity {
				wine_id: *wine_id,
				similarity: query.dot(unit).clamp(-1.0, 1.0),
			})
			.collect();

		scored.sort_by(|a, b| {
			b.similarity
				.total_cmp(&a.similarity)
				.then_with(|| a.wine_id.cmp(&b.wine_id))
		});
		scored.truncate(top_k.get());
		Ok(scored)
	}

	fn len(&self) -> usize {
		self.items.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn item(id: i64, v: &[f32]) -> (WineId, Embedding) {
		(WineId(id), Embedding::new(v.to_vec()))
	}

	#[test]
	fn top_k_rejects_non_positive() {
		assert!(matches!(TopK::new(0), Err(Error::InvalidArgument(_))));
		assert!(matches!(TopK::new(-3), Err(Error::InvalidArgument(_))));
		assert_eq!(TopK::new(4).unwrap().get(), 4);
	}

	#[test]
	fn orders_by_similarity_then_id() {
		let ranker = FullScanRanker::new(vec![
			item(3, &[0.0, 1.0]),
			item(2, &[1.0, 1.0]),
			item(1, &[2.0, 2.0]),
			item(4, &[1.0, 0.0]),
		])
		.unwrap();

		let results = ranker.rank(&Embedding::new(vec![1.0, 0.2]), TopK::new(10).unwrap()).unwrap();
		let ids: Vec<i64> = results.iter().map(|r| r.wine_id.0).collect();
		assert_eq!(ids, vec![4, 1, 2, 3]);
		assert_eq!(results[1].similarity, results[2].similarity);
		assert!(results.iter().all(|r| (-1.0..=1.0).contains(&r.similarity)));
	}

	#[test]
	fn truncates_to_top_k() {
		let ranker = FullScanRanker::new(vec![item(1, &[1.0, 0.0]), item(2, &[0.0, 1.0])]).unwrap();
		let results = ranker.rank(&Embedding::new(vec![0.0, 1.0]), TopK::new(1).unwrap()).unwrap();
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].wine_id, WineId(2));
	}

	#[test]
	fn zero_vectors_are_excluded_and_zero_query_rejected() {
		let ranker = FullScanRanker::new(vec![item(1, &[0.0, 0.0]), item(2, &[0.0, 1.0])]).unwrap();
		assert_eq!(ranker.len(), 1);

		let err = ranker.rank(&Embedding::new(vec![0.0, 0.0]), TopK::new(1).unwrap()).unwrap_err();
		assert!(matches!(err, Error::InvalidArgument(_)));
	}

	#[test]
	fn dimension_mismatch_is_reported() {
		let ranker = FullScanRanker::new(vec![item(1, &[1.0, 0.0])]).unwrap();
		let err = ranker.rank(&Embedding::new(vec![1.0, 0.0, 0.0]), TopK::new(1).unwrap()).unwrap_err();
		assert!(matches!(err, Error::DimensionMismatch { expected: 2, actual: 3 }));

		let err = FullScanRanker::new(vec![item(1, &[1.0]), item(2, &[1.0, 0.0])]).unwrap_err();
		assert!(matches!(err, Error::DimensionMismatch { .. }));
	}

	#[test]
	fn empty_snapshot_ranks_nothing() {
		let ranker = FullScanRanker::new(Vec::new()).unwrap();
		assert!(ranker.is_empty());
		let results = ranker.rank(&Embedding::new(vec![1.0]), TopK::new(3).unwrap()).unwrap();
		assert!(results.is_empty());
	}
}
