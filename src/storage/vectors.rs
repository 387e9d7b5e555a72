//! Catalog item vectors (`wine_vectors`)
//!
//! Each row references `wines(id)` with `ON DELETE CASCADE`, so removing a
//! wine removes its vector inside the database itself.

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::core::{Embedding, WineId};
use crate::error::{Error, Result};

use super::database::{decode_vector, dimension_to_i64, encode_vector};
use super::Database;

pub(crate) const CREATE_SQL: &str = r"
CREATE TABLE IF NOT EXISTS wine_vectors (
    wine_id INTEGER PRIMARY KEY REFERENCES wines(id) ON DELETE CASCADE,
    dimension INTEGER NOT NULL,
    vector BLOB NOT NULL
);
";

pub(crate) fn recreate(conn: &Connection) -> Result<()> {
	conn.execute_batch("DROP TABLE IF EXISTS wine_vectors;")?;
	conn.execute_batch(CREATE_SQL)?;
	Ok(())
}

/// Insert or overwrite the vector of an existing wine
pub(crate) fn put(conn: &Connection, wine_id: WineId, embedding: &Embedding) -> Result<()> {
	conn.execute(
		"INSERT INTO wine_vectors (wine_id, dimension, vector)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(wine_id) DO UPDATE SET
            dimension = excluded.dimension,
            vector = excluded.vector",
		params![wine_id.0, dimension_to_i64(embedding)?, encode_vector(embedding.as_slice())],
	)
	.map_err(|err| match err.sqlite_error_code() {
		Some(ErrorCode::ConstraintViolation) => {
			Error::InvalidArgument(format!("wine {} does not exist", wine_id))
		}
		_ => Error::from(err),
	})?;
	Ok(())
}

impl Database {
	pub fn put_vector(&self, wine_id: WineId, embedding: &Embedding) -> Result<()> {
		put(self.connection(), wine_id, embedding)
	}

	pub fn vector(&self, wine_id: WineId) -> Result<Option<Embedding>> {
		let row = self
			.connection()
			.query_row(
				"SELECT dimension, vector FROM wine_vectors WHERE wine_id = ?1",
				params![wine_id.0],
				|row| Ok((row.get::<_, i64>(0)?, row.get::<_, Vec<u8>>(1)?)),
			)
			.optional()?;

		row.map(|(dim, blob)| decode_vector(&blob, dim).map(Embedding::new))
			.transpose()
	}

	/// Every stored vector, ordered by wine id
	pub fn vectors(&self) -> Result<Vec<(WineId, Embedding)>> {
		let mut stmt = self
			.connection()
			.prepare("SELECT wine_id, dimension, vector FROM wine_vectors ORDER BY wine_id ASC")?;
		let rows = stmt.query_map([], |row| {
			Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?, row.get::<_, Vec<u8>>(2)?))
		})?;

		let mut out = Vec::new();
		for row in rows {
			let (wine_id, dim, blob) = row?;
			out.push((WineId(wine_id), Embedding::new(decode_vector(&blob, dim)?)));
		}
		Ok(out)
	}

	pub fn vector_count(&self) -> Result<usize> {
		let count: i64 = self
			.connection()
			.query_row("SELECT COUNT(*) FROM wine_vectors", [], |row| row.get(0))?;
		Ok(count as usize)
	}
}
