//! Vocabulary drift between the catalog and the last ingestion

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::core::{term, VocabularyFingerprint};
use crate::error::Result;
use crate::storage::Database;

use super::ingest::extract_vocabulary;

#[derive(Debug, Clone, Serialize)]
pub struct DriftReport {
	pub catalog_terms: usize,
	pub subset_terms: usize,
	/// Catalog terms with no persisted embedding
	pub missing: Vec<String>,
	/// Persisted terms no longer used by any wine
	pub stale: Vec<String>,
	/// Raw attribute values that only differ from another value by case
	/// or surrounding whitespace
	pub variants: Vec<String>,
	pub current_fingerprint: VocabularyFingerprint,
	pub ingested_fingerprint: Option<VocabularyFingerprint>,
}

impl DriftReport {
	/// Every catalog term can be resolved and no attribute has competing
	/// spellings
	pub fn is_consistent(&self) -> bool {
		self.missing.is_empty() && self.variants.is_empty()
	}

	/// The catalog changed since the last ingestion (or none ran yet)
	pub fn needs_ingest(&self) -> bool {
		self.ingested_fingerprint.as_ref() != Some(&self.current_fingerprint)
	}
}

/// Compare the catalog vocabulary against the persisted term subset
pub fn check(db: &Database) -> Result<DriftReport> {
	let wines = db.wines()?;
	let vocabulary = extract_vocabulary(&wines);
	let subset = db.terms()?;

	let missing = vocabulary.difference(&subset).cloned().collect();
	let stale = subset.difference(&vocabulary).cloned().collect();
	let variants = spelling_variants(&db.unique_attributes()?.all());

	let current_fingerprint = VocabularyFingerprint::compute(vocabulary.iter().map(String::as_str));
	let ingested_fingerprint = db.manifest()?.map(|manifest| manifest.fingerprint());

	Ok(DriftReport {
		catalog_terms: vocabulary.len(),
		subset_terms: subset.len(),
		missing,
		stale,
		variants,
		current_fingerprint,
		ingested_fingerprint,
	})
}

fn spelling_variants(raw_values: &BTreeSet<String>) -> Vec<String> {
	let mut groups: BTreeMap<String, Vec<&str>> = BTreeMap::new();
	for raw in raw_values {
		groups
			.entry(term::normalize(raw.trim()))
			.or_default()
			.push(raw);
	}

	let mut variants: BTreeSet<String> = raw_values
		.iter()
		.filter(|raw| term::has_stray_whitespace(raw))
		.cloned()
		.collect();
	for spellings in groups.values().filter(|spellings| spellings.len() > 1) {
		variants.extend(spellings.iter().map(|raw| raw.to_string()));
	}

	variants.into_iter().collect()
}
