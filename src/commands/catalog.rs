//! Catalog command - import, list and remove wines

use anyhow::{bail, Context, Result};
use colored::*;
use std::path::Path;

use crate::cli::CatalogAction;
use crate::core::{Wine, WineId};
use crate::ui;

pub fn run(db_path: &Path, action: &CatalogAction) -> Result<()> {
	match action {
		CatalogAction::Import { file } => import(db_path, file),
		CatalogAction::List => list(db_path),
		CatalogAction::Remove { id } => remove(db_path, WineId(*id)),
		CatalogAction::Vocabulary => vocabulary(db_path),
	}
}

fn import(db_path: &Path, file: &Path) -> Result<()> {
	let content = std::fs::read_to_string(file).with_context(|| format!("cannot read {}", file.display()))?;
	let wines: Vec<Wine> =
		serde_json::from_str(&content).with_context(|| format!("{} is not a JSON array of wines", file.display()))?;

	let mut db = super::open_database(db_path)?;
	let written = db.insert_wines(&wines)?;

	ui::success(&format!("Imported {} wines from {}", written, ui::path_link(file)));
	if db.manifest()?.is_some() {
		ui::info("Run 'sommelier ingest' to vectorize the new entries");
	}
	Ok(())
}

fn list(db_path: &Path) -> Result<()> {
	let db = super::open_database(db_path)?;
	let wines = db.wines()?;

	if wines.is_empty() {
		ui::warn("Catalog is empty");
		return Ok(());
	}

	for wine in &wines {
		let vectorized = if db.vector(wine.id)?.is_some() {
			"●".bright_green()
		} else {
			"○".dimmed()
		};
		let year = wine.year.map(|y| y.to_string()).unwrap_or_default();
		println!(
			"{} {} {} {} {}",
			vectorized,
			format!("{:>4}", wine.id.0).bright_blue().bold(),
			wine.name.bright_white(),
			year.dimmed(),
			wine.attributes().join(" · ").dimmed(),
		);
	}

	ui::info(&format!("{} wines, {} vectorized", wines.len(), db.vector_count()?));
	Ok(())
}

fn remove(db_path: &Path, id: WineId) -> Result<()> {
	let db = super::open_database(db_path)?;
	let had_vector = db.vector(id)?.is_some();

	if !db.delete_wine(id)? {
		bail!("wine {} does not exist", id);
	}

	if had_vector {
		ui::success(&format!("Removed wine {} and its vector", id));
	} else {
		ui::success(&format!("Removed wine {}", id));
	}
	Ok(())
}

fn vocabulary(db_path: &Path) -> Result<()> {
	let db = super::open_database(db_path)?;
	println!("{}", serde_json::to_string_pretty(&db.unique_attributes()?)?);
	Ok(())
}
