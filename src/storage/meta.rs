//! Manifest of the last completed ingestion run

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::core::VocabularyFingerprint;
use crate::error::Result;

use super::Database;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionManifest {
	pub fingerprint: String,
	pub source: String,
	pub dimension: usize,
	pub vocabulary_size: usize,
	pub resolved_terms: usize,
	pub vectorized_wines: usize,
	/// RFC 3339 completion time
	pub completed_at: String,
}

impl IngestionManifest {
	pub fn fingerprint(&self) -> VocabularyFingerprint {
		VocabularyFingerprint::from_stored(self.fingerprint.clone())
	}
}

pub(crate) fn record(conn: &Connection, manifest: &IngestionManifest) -> Result<()> {
	conn.execute(
		"INSERT INTO ingestion_meta (
            id, fingerprint, source, dimension, vocabulary_size,
            resolved_terms, vectorized_wines, completed_at
         ) VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(id) DO UPDATE SET
            fingerprint = excluded.fingerprint,
            source = excluded.source,
            dimension = excluded.dimension,
            vocabulary_size = excluded.vocabulary_size,
            resolved_terms = excluded.resolved_terms,
            vectorized_wines = excluded.vectorized_wines,
            completed_at = excluded.completed_at",
		params![
			manifest.fingerprint,
			manifest.source,
			manifest.dimension as i64,
			manifest.vocabulary_size as i64,
			manifest.resolved_terms as i64,
			manifest.vectorized_wines as i64,
			manifest.completed_at,
		],
	)?;
	Ok(())
}

impl Database {
	/// Manifest of the last ingestion, `None` before the first run
	pub fn manifest(&self) -> Result<Option<IngestionManifest>> {
		let manifest = self
			.connection()
			.query_row(
				"SELECT fingerprint, source, dimension, vocabulary_size,
                        resolved_terms, vectorized_wines, completed_at
                 FROM ingestion_meta WHERE id = 1",
				[],
				|row| {
					Ok(IngestionManifest {
						fingerprint: row.get(0)?,
						source: row.get(1)?,
						dimension: row.get::<_, i64>(2)? as usize,
						vocabulary_size: row.get::<_, i64>(3)? as usize,
						resolved_terms: row.get::<_, i64>(4)? as usize,
						vectorized_wines: row.get::<_, i64>(5)? as usize,
						completed_at: row.get(6)?,
					})
				},
			)
			.optional()?;
		Ok(manifest)
	}
}
