//! Catalog records (`wines`)

use std::collections::BTreeSet;

use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;

use crate::core::{Wine, WineId};
use crate::error::Result;

use super::Database;

const WINE_COLUMNS: &str = "id, name, type, variety, year, region, price, topnote, bottomnote";

/// Distinct values of each categorical attribute
#[derive(Debug, Default, Serialize)]
pub struct UniqueAttributes {
	#[serde(rename = "type")]
	pub wine_type: BTreeSet<String>,
	pub variety: BTreeSet<String>,
	pub region: BTreeSet<String>,
	pub topnote: BTreeSet<String>,
	pub bottomnote: BTreeSet<String>,
}

impl UniqueAttributes {
	/// Union of every attribute's values, raw as stored
	pub fn all(&self) -> BTreeSet<String> {
		self.wine_type
			.iter()
			.chain(&self.variety)
			.chain(&self.region)
			.chain(&self.topnote)
			.chain(&self.bottomnote)
			.cloned()
			.collect()
	}
}

fn decode_wine(row: &Row<'_>) -> rusqlite::Result<Wine> {
	Ok(Wine {
		id: WineId(row.get(0)?),
		name: row.get(1)?,
		wine_type: row.get(2)?,
		variety: row.get(3)?,
		year: row.get(4)?,
		region: row.get(5)?,
		price: row.get(6)?,
		topnote: row.get(7)?,
		bottomnote: row.get(8)?,
	})
}

impl Database {
	/// Insert or update wines in one transaction. Updating a wine keeps its
	/// stored vector until the next ingestion.
	pub fn insert_wines(&mut self, wines: &[Wine]) -> Result<usize> {
		let tx = self.connection_mut().transaction()?;
		{
			let mut stmt = tx.prepare(
				"INSERT INTO wines (id, name, type, variety, year, region, price, topnote, bottomnote)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    type = excluded.type,
                    variety = excluded.variety,
                    year = excluded.year,
                    region = excluded.region,
                    price = excluded.price,
                    topnote = excluded.topnote,
                    bottomnote = excluded.bottomnote",
			)?;
			for wine in wines {
				stmt.execute(params![
					wine.id.0,
					wine.name,
					wine.wine_type,
					wine.variety,
					wine.year,
					wine.region,
					wine.price,
					wine.topnote,
					wine.bottomnote,
				])?;
			}
		}
		tx.commit()?;
		Ok(wines.len())
	}

	/// All wines ordered by id
	pub fn wines(&self) -> Result<Vec<Wine>> {
		let mut stmt = self
			.connection()
			.prepare(&format!("SELECT {} FROM wines ORDER BY id ASC", WINE_COLUMNS))?;
		let rows = stmt.query_map([], decode_wine)?;
		let mut wines = Vec::new();
		for row in rows {
			wines.push(row?);
		}
		Ok(wines)
	}

	pub fn wine(&self, id: WineId) -> Result<Option<Wine>> {
		let wine = self
			.connection()
			.query_row(
				&format!("SELECT {} FROM wines WHERE id = ?1", WINE_COLUMNS),
				params![id.0],
				decode_wine,
			)
			.optional()?;
		Ok(wine)
	}

	/// Remove a wine; its vector goes with it. Returns whether it existed.
	pub fn delete_wine(&self, id: WineId) -> Result<bool> {
		let deleted = self
			.connection()
			.execute("DELETE FROM wines WHERE id = ?1", params![id.0])?;
		Ok(deleted > 0)
	}

	pub fn wine_count(&self) -> Result<usize> {
		let count: i64 = self
			.connection()
			.query_row("SELECT COUNT(*) FROM wines", [], |row| row.get(0))?;
		Ok(count as usize)
	}

	pub fn unique_attributes(&self) -> Result<UniqueAttributes> {
		let mut unique = UniqueAttributes::default();
		for wine in self.wines()? {
			unique.wine_type.insert(wine.wine_type);
			unique.variety.insert(wine.variety);
			unique.region.insert(wine.region);
			unique.topnote.insert(wine.topnote);
			unique.bottomnote.insert(wine.bottomnote);
		}
		Ok(unique)
	}
}
