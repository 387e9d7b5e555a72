//! Recommend command - rank wines against preference terms

use anyhow::{bail, Result};
use colored::*;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::config::LOW_SCORE_THRESHOLD;
use crate::search::{self, Ranker, Recommendation, Recommender, TopK};
use crate::ui;

pub fn run(db_path: &Path, terms: &[String], payload: Option<&str>, limit: usize, format: OutputFormat) -> Result<()> {
	let db = super::open_database(db_path)?;
	let recommender = Recommender::load(&db)?;

	if let Some(body) = payload {
		let response = search::handle(&recommender, body);
		println!("{}", serde_json::to_string_pretty(&response.body)?);
		if !response.is_success() {
			bail!("request rejected with status {}", response.status);
		}
		return Ok(());
	}

	if recommender.ranker().is_empty() {
		ui::warn("No wine vectors found. Run 'sommelier ingest' first.");
	}

	let start = std::time::Instant::now();
	let recommendation = recommender.recommend(terms, TopK::new(limit as i64)?)?;

	match format {
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recommendation)?),
		OutputFormat::Text => {
			ui::info(&format!("Preferences: {}", terms.join(", ").bright_blue()));
			print_recommendation(&recommendation);
			ui::debug(&format!("Ranked in {}ms", start.elapsed().as_millis()));
		}
	}

	Ok(())
}

/// Ranked list plus warnings about unresolved terms and weak matches
pub(crate) fn print_recommendation(recommendation: &Recommendation) {
	if !recommendation.unresolved.is_empty() {
		ui::warn(&format!(
			"Ignored unknown terms: {}",
			recommendation.unresolved.join(", ").yellow()
		));
	}

	if recommendation.data.is_empty() {
		ui::warn("No matches found");
		return;
	}

	println!();
	for (i, matched) in recommendation.data.iter().enumerate() {
		let name = matched.name.as_deref().unwrap_or("unnamed");
		println!(
			"{}. {} {} {}",
			format!("{:2}", i + 1).bright_blue().bold(),
			name.bright_white(),
			format!("#{}", matched.item_id).dimmed(),
			ui::score(matched.similarity),
		);
	}
	println!();

	let best = recommendation.data[0].similarity;
	if best < LOW_SCORE_THRESHOLD {
		ui::warn("Weak matches only. Try more specific preferences.");
	}
}
