//! SQLite connection, schema and the ingestion rebuild transaction

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::core::{Embedding, WineId};
use crate::embeddings::EmbeddingTable;
use crate::error::{Error, Result};

use super::meta::IngestionManifest;
use super::{meta, terms, vectors};

const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS wines (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    variety TEXT NOT NULL,
    year INTEGER,
    region TEXT NOT NULL,
    price INTEGER,
    topnote TEXT NOT NULL,
    bottomnote TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ingestion_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    fingerprint TEXT NOT NULL,
    source TEXT NOT NULL,
    dimension INTEGER NOT NULL,
    vocabulary_size INTEGER NOT NULL,
    resolved_terms INTEGER NOT NULL,
    vectorized_wines INTEGER NOT NULL,
    completed_at TEXT NOT NULL
);
";

/// Owned handle to the recommendation store. The connection is released
/// when the value is dropped.
pub struct Database {
	conn: Connection,
}

impl Database {
	/// Open or create the store at `path`
	pub fn open(path: &Path) -> Result<Self> {
		Self::init(Connection::open(path)?)
	}

	pub fn open_in_memory() -> Result<Self> {
		Self::init(Connection::open_in_memory()?)
	}

	fn init(conn: Connection) -> Result<Self> {
		conn.pragma_update(None, "foreign_keys", 1)?;
		conn.execute_batch(SCHEMA_SQL)?;
		conn.execute_batch(terms::CREATE_SQL)?;
		conn.execute_batch(vectors::CREATE_SQL)?;
		Ok(Self { conn })
	}

	/// How long a write waits for another connection's lock before failing
	/// with `StoreUnavailable`
	pub fn set_busy_timeout(&self, timeout: Duration) -> Result<()> {
		self.conn.busy_timeout(timeout)?;
		Ok(())
	}

	pub(crate) fn connection(&self) -> &Connection {
		&self.conn
	}

	pub(crate) fn connection_mut(&mut self) -> &mut Connection {
		&mut self.conn
	}

	/// Start the exclusive drop-and-rebuild of derived tables. Nothing is
	/// visible to readers until [`Rebuild::commit`]; dropping the value
	/// rolls every write back.
	pub fn begin_rebuild(&mut self) -> Result<Rebuild<'_>> {
		let tx = self
			.conn
			.transaction_with_behavior(TransactionBehavior::Immediate)?;
		Ok(Rebuild { tx })
	}
}

/// Writes of one ingestion run, applied atomically
pub struct Rebuild<'conn> {
	tx: Transaction<'conn>,
}

impl Rebuild<'_> {
	/// Replace the resolved term subset. Returns the number of rows inserted.
	pub fn replace_terms(&self, subset: &EmbeddingTable) -> Result<usize> {
		terms::recreate(&self.tx)?;
		let mut inserted = 0;
		for term in subset.terms() {
			if let Some(embedding) = subset.get(term) {
				if terms::insert(&self.tx, term, embedding)? {
					inserted += 1;
				}
			}
		}
		Ok(inserted)
	}

	/// Replace every catalog item vector
	pub fn replace_vectors(&self, items: &[(WineId, Embedding)]) -> Result<usize> {
		vectors::recreate(&self.tx)?;
		for (wine_id, embedding) in items {
			vectors::put(&self.tx, *wine_id, embedding)?;
		}
		Ok(items.len())
	}

	pub fn record(&self, manifest: &IngestionManifest) -> Result<()> {
		meta::record(&self.tx, manifest)
	}

	pub fn commit(self) -> Result<()> {
		self.tx.commit().map_err(Error::from)
	}
}

/// Little-endian f32 blob as stored in vector columns
pub(crate) fn encode_vector(vector: &[f32]) -> Vec<u8> {
	let mut bytes = Vec::with_capacity(std::mem::size_of_val(vector));
	for &value in vector {
		bytes.extend_from_slice(&value.to_le_bytes());
	}
	bytes
}

pub(crate) fn decode_vector(blob: &[u8], dimension: i64) -> Result<Vec<f32>> {
	let dimension = usize::try_from(dimension)
		.map_err(|_| Error::CorruptStore(format!("negative vector dimension {}", dimension)))?;
	let expected_len = dimension * std::mem::size_of::<f32>();
	if blob.len() != expected_len {
		return Err(Error::CorruptStore(format!(
			"invalid vector byte length: expected {}, got {}",
			expected_len,
			blob.len()
		)));
	}

	let mut out = Vec::with_capacity(dimension);
	for chunk in blob.chunks_exact(4) {
		let value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
		if !value.is_finite() {
			return Err(Error::CorruptStore("vector contains non-finite values".to_string()));
		}
		out.push(value);
	}
	Ok(out)
}

pub(crate) fn dimension_to_i64(embedding: &Embedding) -> Result<i64> {
	i64::try_from(embedding.dimension())
		.map_err(|_| Error::InvalidArgument(format!("dimension {} too large", embedding.dimension())))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn vector_blob_roundtrip_checks_length() {
		let blob = encode_vector(&[0.5, -1.25, 3.0]);
		assert_eq!(blob.len(), 12);
		assert_eq!(decode_vector(&blob, 3).unwrap(), vec![0.5, -1.25, 3.0]);
		assert!(matches!(decode_vector(&blob, 2), Err(Error::CorruptStore(_))));
		assert!(matches!(decode_vector(&blob, -1), Err(Error::CorruptStore(_))));
	}

	#[test]
	fn rebuild_rolls_back_when_dropped() {
		let mut db = Database::open_in_memory().unwrap();
		let subset = EmbeddingTable::from_entries(2, vec![("oak".to_string(), Embedding::new(vec![1.0, 0.0]))]).unwrap();

		{
			let rebuild = db.begin_rebuild().unwrap();
			assert_eq!(rebuild.replace_terms(&subset).unwrap(), 1);
		}
		assert_eq!(db.term_count().unwrap(), 0);

		let rebuild = db.begin_rebuild().unwrap();
		rebuild.replace_terms(&subset).unwrap();
		rebuild.commit().unwrap();
		assert_eq!(db.term_count().unwrap(), 1);
	}
}
