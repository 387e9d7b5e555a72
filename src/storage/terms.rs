//! Resolved term subset (`token_embeddings`)

use std::collections::BTreeSet;

use rusqlite::{params, Connection};

use crate::core::Embedding;
use crate::embeddings::EmbeddingTable;
use crate::error::{Error, Result};

use super::database::{decode_vector, dimension_to_i64, encode_vector};
use super::Database;

pub(crate) const CREATE_SQL: &str = r"
CREATE TABLE IF NOT EXISTS token_embeddings (
    token TEXT PRIMARY KEY,
    dimension INTEGER NOT NULL,
    vector BLOB NOT NULL
);
";

pub(crate) fn recreate(conn: &Connection) -> Result<()> {
	conn.execute_batch("DROP TABLE IF EXISTS token_embeddings;")?;
	conn.execute_batch(CREATE_SQL)?;
	Ok(())
}

/// Insert a term; an existing term is left untouched. Returns whether a row
/// was written.
pub(crate) fn insert(conn: &Connection, term: &str, embedding: &Embedding) -> Result<bool> {
	let changed = conn.execute(
		"INSERT INTO token_embeddings (token, dimension, vector)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(token) DO NOTHING",
		params![term, dimension_to_i64(embedding)?, encode_vector(embedding.as_slice())],
	)?;
	Ok(changed == 1)
}

impl Database {
	/// Insert one resolved term outside an ingestion run
	pub fn insert_term(&self, term: &str, embedding: &Embedding) -> Result<bool> {
		insert(self.connection(), term, embedding)
	}

	/// Load the persisted subset as a lookup table for query time
	pub fn load_terms(&self) -> Result<EmbeddingTable> {
		let mut stmt = self
			.connection()
			.prepare("SELECT token, dimension, vector FROM token_embeddings ORDER BY token ASC")?;
		let rows = stmt.query_map([], |row| {
			Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?, row.get::<_, Vec<u8>>(2)?))
		})?;

		let mut entries = Vec::new();
		let mut dimension = None;
		for row in rows {
			let (token, dim, blob) = row?;
			let vector = decode_vector(&blob, dim)?;
			match dimension {
				None => dimension = Some(vector.len()),
				Some(expected) if expected != vector.len() => {
					return Err(Error::CorruptStore(format!(
						"term '{}' has dimension {}, expected {}",
						token,
						vector.len(),
						expected
					)));
				}
				Some(_) => {}
			}
			entries.push((token, Embedding::new(vector)));
		}

		EmbeddingTable::from_entries(dimension.unwrap_or(0), entries)
	}

	/// Keys of the persisted subset
	pub fn terms(&self) -> Result<BTreeSet<String>> {
		let mut stmt = self.connection().prepare("SELECT token FROM token_embeddings")?;
		let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
		let mut terms = BTreeSet::new();
		for row in rows {
			terms.insert(row?);
		}
		Ok(terms)
	}

	pub fn term_count(&self) -> Result<usize> {
		let count: i64 = self
			.connection()
			.query_row("SELECT COUNT(*) FROM token_embeddings", [], |row| row.get(0))?;
		Ok(count as usize)
	}
}
