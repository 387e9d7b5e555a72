//! Query-time recommendation service

use std::collections::HashMap;

use serde::Serialize;

use crate::core::WineId;
use crate::embeddings::{CompositionMode, EmbeddingTable, TermResolver, VectorComposer};
use crate::error::Result;
use crate::storage::Database;

use super::ranker::{FullScanRanker, Ranker, TopK};

/// One recommended wine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
	pub item_id: WineId,
	#[serde(rename = "wine_name", skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	pub similarity: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
	pub data: Vec<Match>,
	/// Preference terms with no embedding
	pub unresolved: Vec<String>,
}

/// Immutable snapshot of everything a query needs: the resolved term
/// subset, the ranker over item vectors and display names. Shared by
/// reference across threads; nothing is mutated after construction.
pub struct Recommender<R: Ranker = FullScanRanker> {
	table: EmbeddingTable,
	ranker: R,
	names: HashMap<WineId, String>,
}

impl Recommender<FullScanRanker> {
	/// Snapshot the persisted subset and vectors
	pub fn load(db: &Database) -> Result<Self> {
		let table = db.load_terms()?;
		let ranker = FullScanRanker::new(db.vectors()?)?;
		let names = db
			.wines()?
			.into_iter()
			.map(|wine| (wine.id, wine.name))
			.collect();

		crate::ui::debug(&format!(
			"Loaded {} terms (dim {}) and {} wine vectors",
			table.len(),
			table.dimension(),
			ranker.len()
		));

		Ok(Self::new(table, ranker, names))
	}
}

impl<R: Ranker> Recommender<R> {
	pub fn new(table: EmbeddingTable, ranker: R, names: HashMap<WineId, String>) -> Self {
		Self { table, ranker, names }
	}

	pub fn table(&self) -> &EmbeddingTable {
		&self.table
	}

	pub fn ranker(&self) -> &R {
		&self.ranker
	}

	/// Rank wines against the summed vector of `preferences`
	pub fn recommend<I, S>(&self, preferences: I, top_k: TopK) -> Result<Recommendation>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let composer = VectorComposer::new(TermResolver::new(&self.table));
		let query = composer.compose(preferences, CompositionMode::Sum)?;

		let data = self
			.ranker
			.rank(&query.vector, top_k)?
			.into_iter()
			.map(|scored| Match {
				item_id: scored.wine_id,
				name: self.names.get(&scored.wine_id).cloned(),
				similarity: scored.similarity,
			})
			.collect();

		Ok(Recommendation {
			data,
			unresolved: query.unresolved,
		})
	}
}
