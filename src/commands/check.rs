//! Check command - vocabulary drift report

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

use crate::processing::drift;
use crate::ui;

pub fn run(db_path: &Path) -> Result<()> {
	let db = super::open_database(db_path)?;
	let report = drift::check(&db)?;

	ui::header("Vocabulary");
	println!("  {} {}", "Catalog terms:".bright_blue(), report.catalog_terms);
	println!("  {} {}", "Resolved subset:".bright_blue(), report.subset_terms);
	println!("  {} {}", "Current fingerprint:".bright_blue(), report.current_fingerprint);
	match &report.ingested_fingerprint {
		Some(fingerprint) => println!("  {} {}", "Ingested fingerprint:".bright_blue(), fingerprint),
		None => println!("  {} {}", "Ingested fingerprint:".bright_blue(), "never ingested".dimmed()),
	}

	print_terms("Missing", &report.missing);
	print_terms("Variants", &report.variants);
	print_terms("Stale", &report.stale);
	println!();

	if report.needs_ingest() {
		ui::warn("Catalog changed since the last ingestion. Run 'sommelier ingest'.");
	}

	if report.is_consistent() {
		println!("{}", "PASS".bright_green().bold());
		Ok(())
	} else {
		println!("{}", "FAIL".bright_red().bold());
		bail!(
			"{} missing terms, {} spelling variants",
			report.missing.len(),
			report.variants.len()
		)
	}
}

fn print_terms(label: &str, terms: &[String]) {
	if terms.is_empty() {
		return;
	}
	println!("  {} {}", format!("{}:", label).yellow(), terms.len());
	for term in terms {
		println!("    {}", format!("{:?}", term).dimmed());
	}
}
