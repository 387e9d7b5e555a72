//! Catalog records

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Catalog item identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WineId(pub i64);

impl std::fmt::Display for WineId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A wine as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wine {
	pub id: WineId,
	pub name: String,
	#[serde(rename = "type")]
	pub wine_type: String,
	pub variety: String,
	#[serde(default)]
	pub year: Option<i32>,
	pub region: String,
	#[serde(default)]
	pub price: Option<i32>,
	pub topnote: String,
	pub bottomnote: String,
}

impl Wine {
	/// Raw categorical attribute values, in column order
	pub fn attributes(&self) -> [&str; 5] {
		[
			&self.wine_type,
			&self.variety,
			&self.region,
			&self.topnote,
			&self.bottomnote,
		]
	}

	/// Distinct normalized terms describing this wine
	pub fn terms(&self) -> BTreeSet<String> {
		self.attributes()
			.into_iter()
			.map(super::term::normalize)
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn wine() -> Wine {
		Wine {
			id: WineId(7),
			name: "Rioja Oak Cabernet".into(),
			wine_type: "Red".into(),
			variety: "cabernet".into(),
			year: Some(2015),
			region: "rioja".into(),
			price: Some(42),
			topnote: "oak".into(),
			bottomnote: "Oak".into(),
		}
	}

	#[test]
	fn terms_are_distinct_and_normalized() {
		let terms: Vec<String> = wine().terms().into_iter().collect();
		assert_eq!(terms, vec!["cabernet", "oak", "red", "rioja"]);
	}

	#[test]
	fn deserializes_type_field() {
		let json = r#"{"id": 1, "name": "Mosel Sweet Riesling", "type": "white",
			"variety": "riesling", "region": "mosel", "topnote": "sweet", "bottomnote": "floral"}"#;
		let wine: Wine = serde_json::from_str(json).unwrap();
		assert_eq!(wine.id, WineId(1));
		assert_eq!(wine.wine_type, "white");
		assert_eq!(wine.year, None);
	}
}
