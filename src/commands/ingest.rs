//! Ingest command - vectorize the catalog from a GloVe file

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

use crate::config;
use crate::embeddings::MalformedPolicy;
use crate::processing::{self, IngestOptions};
use crate::ui;

pub fn run(db_path: &Path, embeddings: Option<&Path>, strict: bool, dimension: Option<usize>) -> Result<()> {
	let Some(source) = config::embeddings_path(embeddings) else {
		bail!(
			"No embedding source found. Pass --embeddings or set {}",
			config::EMBEDDINGS_ENV
		);
	};

	ui::print_logo();
	println!();

	let mut db = super::open_database(db_path)?;
	let wines = db.wine_count()?;
	if wines == 0 {
		ui::warn("Catalog is empty. Run 'sommelier catalog import' first.");
	}

	let options = IngestOptions {
		source,
		policy: if strict {
			MalformedPolicy::Abort
		} else {
			MalformedPolicy::Skip
		},
		dimension,
	};

	let report = processing::run(&mut db, &options)?;
	let coverage = &report.coverage;

	ui::summary(
		&[
			("Embeddings", format!("{} (dim {})", report.load.entries, report.manifest.dimension)),
			("Malformed", report.load.skipped.len().to_string()),
			(
				"Vocabulary",
				format!(
					"{}/{} terms resolved ({:.1}%)",
					coverage.resolved,
					coverage.total,
					coverage.ratio() * 100.0
				),
			),
			("Wines", format!("{}/{} vectorized", report.wines_vectorized(), report.wines_total)),
			("Fingerprint", report.manifest.fingerprint().short().to_string()),
		],
		report.duration.as_secs_f32(),
	);

	if !coverage.is_complete() {
		ui::warn(&format!(
			"Unresolved: {}",
			coverage.unresolved.join(", ").yellow()
		));
	}
	if !report.wines_skipped.is_empty() {
		let ids: Vec<String> = report.wines_skipped.iter().map(ToString::to_string).collect();
		ui::warn(&format!("No vector for wines: {}", ids.join(", ")));
	}

	ui::success("Ingestion complete");
	Ok(())
}
