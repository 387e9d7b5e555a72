use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::DEFAULT_LIMIT;

/// Output format for recommendations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Colored ranking for humans
	#[default]
	Text,
	/// `{"data": [...], "unresolved": [...]}`
	Json,
}

fn parse_limit(s: &str) -> Result<usize, String> {
	let val: i64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if val <= 0 {
		Err(format!("limit must be a positive integer, got {}", val))
	} else {
		Ok(val as usize)
	}
}

fn styles() -> Styles {
	let color = |c: AnsiColor| Some(Color::Ansi(c));
	Styles::styled()
		.header(Style::new().bold().fg_color(color(AnsiColor::Magenta)))
		.usage(Style::new().bold().fg_color(color(AnsiColor::Magenta)))
		.literal(Style::new().fg_color(color(AnsiColor::Blue)))
		.placeholder(Style::new().fg_color(color(AnsiColor::Yellow)))
		.valid(Style::new().fg_color(color(AnsiColor::Blue)))
		.invalid(Style::new().fg_color(color(AnsiColor::Red)))
}

#[derive(Parser, Debug)]
#[command(
	name = "sommelier",
	author,
	version,
	about = "Wine recommendations from free-form taste preferences",
	styles = styles(),
	after_help = format!(
		"{title}
  {bin} {catalog} {import_args}        {import_desc}
  {bin} {ingest}  {ingest_args}  {ingest_desc}
  {bin} {recommend} {recommend_args}   {recommend_desc}
  {bin} {check}                          {check_desc}",
		title = "Examples:".bright_magenta().bold(),
		bin = "sommelier".bright_blue(),
		catalog = "catalog".yellow(),
		import_args = "import wines.json",
		import_desc = "Load the wine catalog".dimmed(),
		ingest = "ingest".yellow(),
		ingest_args = "-e glove.6B.50d.txt",
		ingest_desc = "Vectorize the catalog".dimmed(),
		recommend = "recommend".yellow(),
		recommend_args = "herbaceous champagne -n 3",
		recommend_desc = "Top 3 matches".dimmed(),
		check = "check".yellow(),
		check_desc = "Detect vocabulary drift".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// SQLite database (default: $SOMMELIER_DB or ./sommelier.db)
	#[arg(long = "db", value_name = "PATH", global = true)]
	pub db: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Build the term subset and wine vectors from a GloVe file
	Ingest {
		/// Embedding source (default: $SOMMELIER_EMBEDDINGS or ./glove.6B.50d.txt)
		#[arg(short = 'e', long = "embeddings", value_name = "PATH")]
		embeddings: Option<PathBuf>,

		/// Abort on the first malformed line instead of skipping it
		#[arg(long = "strict")]
		strict: bool,

		/// Expected vector length (inferred from the first line otherwise)
		#[arg(short = 'd', long = "dimension")]
		dimension: Option<usize>,
	},

	/// Recommend wines for a set of preference terms
	Recommend {
		/// Preference terms, e.g. "herbaceous" "champagne"
		#[arg(value_name = "TERMS", required_unless_present = "json")]
		terms: Vec<String>,

		/// Raw request payload: {"preferences": {...}, "count": N}
		#[arg(long = "json", value_name = "PAYLOAD", conflicts_with_all = ["terms", "limit"])]
		json: Option<String>,

		/// Number of results
		#[arg(short = 'n', long = "limit", default_value_t = DEFAULT_LIMIT, value_parser = parse_limit)]
		limit: usize,

		/// Output format
		#[arg(short = 'f', long = "format", default_value = "text")]
		format: OutputFormat,
	},

	/// Report vocabulary drift between the catalog and the last ingestion
	Check,

	/// Manage the wine catalog
	Catalog {
		#[command(subcommand)]
		action: CatalogAction,
	},

	/// Interactive recommendation session
	Repl {
		/// Number of results per query
		#[arg(short = 'n', long = "limit", default_value_t = DEFAULT_LIMIT, value_parser = parse_limit)]
		limit: usize,
	},
}

#[derive(Subcommand, Debug)]
pub enum CatalogAction {
	/// Insert or update wines from a JSON array
	Import {
		/// JSON file with wine records
		file: PathBuf,
	},

	/// List all wines
	List,

	/// Delete a wine and its vector
	Remove {
		/// Wine id
		id: i64,
	},

	/// Distinct attribute values as JSON
	Vocabulary,
}
