//! Sommelier - embedding-based wine recommendations
//!
//! Imports a wine catalog, vectorizes it from a GloVe file and ranks wines
//! against free-form taste preferences.

use anyhow::Result;
use clap::Parser;

use sommelier::cli::{Cli, Command};
use sommelier::commands;
use sommelier::config;
use sommelier::ui::Log;

fn main() -> Result<()> {
	let cli = Cli::parse();

	Log::set_verbose(cli.verbose);
	let db_path = config::database_path(cli.db.as_deref());

	match cli.command {
		Command::Ingest {
			embeddings,
			strict,
			dimension,
		} => commands::ingest::run(&db_path, embeddings.as_deref(), strict, dimension),
		Command::Recommend {
			terms,
			json,
			limit,
			format,
		} => commands::recommend::run(&db_path, &terms, json.as_deref(), limit, format),
		Command::Check => commands::check::run(&db_path),
		Command::Catalog { action } => commands::catalog::run(&db_path, &action),
		Command::Repl { limit } => commands::repl::run(&db_path, limit),
	}
}
