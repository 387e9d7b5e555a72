//! REPL mode - interactive recommendation session

use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;

use crate::search::{Ranker, Recommender, TopK};
use crate::ui;

pub fn run(db_path: &Path, limit: usize) -> Result<()> {
	ui::print_logo();
	println!();
	ui::info("Type preference terms separated by spaces, or 'exit' to quit");
	println!();

	// Snapshot once
	let db = super::open_database(db_path)?;
	let recommender = Recommender::load(&db)?;
	let top_k = TopK::new(limit as i64)?;

	if recommender.ranker().is_empty() {
		ui::warn("No wine vectors found. Run 'sommelier ingest' first.");
		return Ok(());
	}

	ui::success(&format!(
		"Loaded {} wines and {} terms",
		recommender.ranker().len(),
		recommender.table().len()
	));
	println!();

	loop {
		print!("{} ", "sommelier>".bright_magenta().bold());
		io::stdout().flush()?;

		let mut input = String::new();
		if io::stdin().read_line(&mut input)? == 0 {
			break;
		}

		let query = input.trim();

		if query.is_empty() {
			continue;
		}

		if query == "exit" || query == "quit" || query == "q" {
			ui::info("Cheers!");
			break;
		}

		if query == "help" {
			show_help();
			continue;
		}

		let terms: Vec<&str> = query.split_whitespace().collect();
		match recommender.recommend(&terms, top_k) {
			Ok(recommendation) => super::recommend::print_recommendation(&recommendation),
			Err(e) => ui::error(&format!("{}", e)),
		}
	}

	Ok(())
}

fn show_help() {
	println!("{}", "REPL Commands:".bright_blue().bold());
	println!("  {}  Recommend wines for these terms", "<terms>".dimmed());
	println!("  {}    Show this help message", "help".dimmed());
	println!("  {}    Exit REPL mode", "exit".dimmed());
}
