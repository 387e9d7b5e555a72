//! Unified logging system

use chrono::Local;
use colored::*;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::{LOW_SCORE_THRESHOLD, STRONG_SCORE_THRESHOLD};

static VERBOSE: AtomicBool = AtomicBool::new(false);

const LOGO: &str = r#"
   _____                           ___
  / ___/____  ____ ___  ____ ___  / (_)__  _____
  \__ \/ __ \/ __ `__ \/ __ `__ \/ / / _ \/ ___/
 ___/ / /_/ / / / / / / / / / / / / /  __/ /
/____/\____/_/ /_/ /_/_/ /_/ /_/_/_/\___/_/      "#;

const SLOGANS: &[&str] = &[
	"Fifty dimensions of terroir",
	"Cosine similarity, served chilled",
	"Pairs well with linear algebra",
	"Notes of oak, hints of GloVe",
	"Decanting vectors since 2014",
	"Your palate, in floating point",
	"Tannins are just another dimension",
	"\"Trust me, it's herbaceous\"",
];

pub fn random_slogan() -> &'static str {
	let idx = rand::rng().random_range(0..SLOGANS.len());
	SLOGANS[idx]
}

pub fn print_logo() {
	println!("{}", LOGO.bright_magenta().bold());
	println!("{}", random_slogan().dimmed().italic());
}

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	println!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	println!("{} {}", "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	println!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

/// Timestamped, only shown with `--verbose`
pub fn debug(msg: &str) {
	if Log::is_verbose() {
		let time = Local::now().format("%H:%M:%S").to_string();
		println!("{} {} {}", time.dimmed(), "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!("\n{}", format!("─── {} ───", text).bright_blue().bold());
}

/// Similarity as a percentage, colored by strength
pub fn score(similarity: f32) -> ColoredString {
	let text = format!("{:.1}%", similarity * 100.0);
	if similarity >= STRONG_SCORE_THRESHOLD {
		text.bright_green()
	} else if similarity < LOW_SCORE_THRESHOLD {
		text.dimmed()
	} else {
		text.normal()
	}
}

/// Clickable file path (OSC 8 terminal hyperlink)
pub fn path_link(path: &std::path::Path) -> String {
	let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
	let uri = format!("file://{}", absolute.display());
	format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", uri, path.display())
}

/// Key/value block printed after long-running commands
pub fn summary(rows: &[(&str, String)], duration_secs: f32) {
	header("Summary");
	for (label, value) in rows {
		println!("  {} {}", format!("{}:", label).bright_blue(), value);
	}
	println!("  {} {:.2}s", "Duration:".bright_blue(), duration_secs);
	println!();
}
