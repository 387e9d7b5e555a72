//! Offline ingestion: embeddings → resolved subset → per-wine vectors

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use thiserror::Error;

use crate::core::{Embedding, VocabularyFingerprint, Wine, WineId};
use crate::embeddings::{
	CompositionMode, EmbeddingTable, LoadReport, MalformedPolicy, TermResolver, VectorComposer,
};
use crate::error::Error;
use crate::storage::{Database, IngestionManifest};
use crate::ui;

/// Pipeline stages, executed strictly in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
	LoadEmbeddings,
	ExtractVocabulary,
	ResolveVocabulary,
	PersistResolvedSubset,
	ComposeItemVectors,
	PersistItemVectors,
}

impl std::fmt::Display for Stage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Stage::LoadEmbeddings => "load embeddings",
			Stage::ExtractVocabulary => "extract vocabulary",
			Stage::ResolveVocabulary => "resolve vocabulary",
			Stage::PersistResolvedSubset => "persist resolved subset",
			Stage::ComposeItemVectors => "compose item vectors",
			Stage::PersistItemVectors => "persist item vectors",
		};
		f.write_str(name)
	}
}

#[derive(Debug, Error)]
#[error("ingestion failed during {stage}: {source}")]
pub struct IngestError {
	pub stage: Stage,
	#[source]
	pub source: Error,
}

trait AtStage<T> {
	fn at(self, stage: Stage) -> Result<T, IngestError>;
}

impl<T> AtStage<T> for crate::error::Result<T> {
	fn at(self, stage: Stage) -> Result<T, IngestError> {
		self.map_err(|source| IngestError { stage, source })
	}
}

#[derive(Debug, Clone)]
pub struct IngestOptions {
	pub source: PathBuf,
	pub policy: MalformedPolicy,
	/// Expected vector length; inferred from the source when `None`
	pub dimension: Option<usize>,
}

/// How much of the catalog vocabulary the embedding source covers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageReport {
	pub total: usize,
	pub resolved: usize,
	/// Sorted terms with no embedding
	pub unresolved: Vec<String>,
}

impl CoverageReport {
	pub fn ratio(&self) -> f32 {
		if self.total == 0 {
			1.0
		} else {
			self.resolved as f32 / self.total as f32
		}
	}

	pub fn is_complete(&self) -> bool {
		self.unresolved.is_empty()
	}
}

#[derive(Debug, Clone)]
pub struct IngestReport {
	pub load: LoadReport,
	pub coverage: CoverageReport,
	pub wines_total: usize,
	/// Wines without a single resolvable term; no vector was stored
	pub wines_skipped: Vec<WineId>,
	pub manifest: IngestionManifest,
	pub duration: Duration,
}

impl IngestReport {
	pub fn wines_vectorized(&self) -> usize {
		self.manifest.vectorized_wines
	}
}

/// Distinct normalized terms across all wines
pub fn extract_vocabulary(wines: &[Wine]) -> BTreeSet<String> {
	wines.iter().flat_map(Wine::terms).collect()
}

/// Run the whole pipeline against the embedding source in `options`
pub fn run(db: &mut Database, options: &IngestOptions) -> Result<IngestReport, IngestError> {
	let start = Instant::now();

	ui::info(&format!("Loading embeddings from {}", options.source.display()));
	let (table, load) =
		EmbeddingTable::load(&options.source, options.policy, options.dimension).at(Stage::LoadEmbeddings)?;

	if table.is_empty() {
		return Err(IngestError {
			stage: Stage::LoadEmbeddings,
			source: Error::InvalidArgument(format!(
				"{} contains no embeddings",
				options.source.display()
			)),
		});
	}

	ui::success(&format!(
		"Loaded {} embeddings (dim {}) in {:.2}s",
		table.len(),
		table.dimension(),
		start.elapsed().as_secs_f32()
	));
	if !load.skipped.is_empty() {
		ui::warn(&format!("Skipped {} malformed lines", load.skipped.len()));
	}

	let source = options.source.display().to_string();
	let mut report = ingest_table(db, &table, &source)?;
	report.load = load;
	report.duration = start.elapsed();
	Ok(report)
}

/// Every stage after loading, against an already built table
pub fn ingest_table(db: &mut Database, table: &EmbeddingTable, source: &str) -> Result<IngestReport, IngestError> {
	let start = Instant::now();

	// Extract
	let wines = db.wines().at(Stage::ExtractVocabulary)?;
	let vocabulary = extract_vocabulary(&wines);
	let fingerprint = VocabularyFingerprint::compute(vocabulary.iter().map(String::as_str));
	ui::debug(&format!(
		"Vocabulary: {} terms across {} wines ({})",
		vocabulary.len(),
		wines.len(),
		fingerprint.short()
	));

	// Resolve
	let resolution = TermResolver::new(table).resolve_all(&vocabulary);
	let coverage = CoverageReport {
		total: vocabulary.len(),
		resolved: resolution.resolved.len(),
		unresolved: resolution.unresolved,
	};
	let subset = EmbeddingTable::from_entries(
		table.dimension(),
		resolution
			.resolved
			.into_iter()
			.map(|(term, embedding)| (term, embedding.clone())),
	)
	.at(Stage::ResolveVocabulary)?;

	for term in &coverage.unresolved {
		ui::warn(&format!("No embedding for '{}'", term));
	}

	// Persist subset
	let rebuild = db.begin_rebuild().at(Stage::PersistResolvedSubset)?;
	let stored_terms = rebuild.replace_terms(&subset).at(Stage::PersistResolvedSubset)?;
	ui::debug(&format!("Stored {} resolved terms", stored_terms));

	// Compose
	let composer = VectorComposer::new(TermResolver::new(&subset));
	let composed: Vec<(WineId, crate::error::Result<Embedding>)> = wines
		.par_iter()
		.map(|wine| {
			let vector = composer
				.compose(wine.terms(), CompositionMode::Mean)
				.map(|composition| composition.vector);
			(wine.id, vector)
		})
		.collect();

	let mut items = Vec::with_capacity(composed.len());
	let mut skipped = Vec::new();
	for (wine_id, vector) in composed {
		match vector {
			Ok(vector) => items.push((wine_id, vector)),
			Err(Error::EmptyComposition { terms }) => {
				ui::debug(&format!("Wine {} skipped, no resolvable terms: {}", wine_id, terms.join(", ")));
				skipped.push(wine_id);
			}
			Err(source) => {
				return Err(IngestError {
					stage: Stage::ComposeItemVectors,
					source,
				})
			}
		}
	}

	// Persist vectors
	let stored_vectors = rebuild.replace_vectors(&items).at(Stage::PersistItemVectors)?;
	let manifest = IngestionManifest {
		fingerprint: fingerprint.to_string(),
		source: source.to_string(),
		dimension: table.dimension(),
		vocabulary_size: coverage.total,
		resolved_terms: coverage.resolved,
		vectorized_wines: stored_vectors,
		completed_at: chrono::Utc::now().to_rfc3339(),
	};
	rebuild.record(&manifest).at(Stage::PersistItemVectors)?;
	rebuild.commit().at(Stage::PersistItemVectors)?;

	Ok(IngestReport {
		load: LoadReport::default(),
		coverage,
		wines_total: wines.len(),
		wines_skipped: skipped,
		manifest,
		duration: start.elapsed(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn wine(id: i64, terms: [&str; 5]) -> Wine {
		Wine {
			id: WineId(id),
			name: format!("Wine {}", id),
			wine_type: terms[0].into(),
			variety: terms[1].into(),
			year: None,
			region: terms[2].into(),
			price: None,
			topnote: terms[3].into(),
			bottomnote: terms[4].into(),
		}
	}

	#[test]
	fn stage_names_read_naturally() {
		assert_eq!(Stage::PersistResolvedSubset.to_string(), "persist resolved subset");
		let err = IngestError {
			stage: Stage::LoadEmbeddings,
			source: Error::InvalidArgument("empty".into()),
		};
		assert_eq!(err.to_string(), "ingestion failed during load embeddings: invalid argument: empty");
	}

	#[test]
	fn vocabulary_is_distinct_and_normalized() {
		let wines = vec![
			wine(1, ["Red", "merlot", "napa", "dark", "woody"]),
			wine(2, ["red", "Merlot", "sonoma", "fruity", "woody"]),
		];
		let vocabulary: Vec<String> = extract_vocabulary(&wines).into_iter().collect();
		assert_eq!(vocabulary, vec!["dark", "fruity", "merlot", "napa", "red", "sonoma", "woody"]);
	}

	#[test]
	fn coverage_ratio() {
		let coverage = CoverageReport {
			total: 4,
			resolved: 3,
			unresolved: vec!["velvety".into()],
		};
		assert_eq!(coverage.ratio(), 0.75);
		assert!(!coverage.is_complete());
		assert_eq!(CoverageReport::default().ratio(), 1.0);
	}
}
