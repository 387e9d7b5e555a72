//! # Command Implementations
//!
//! Each submodule handles one CLI command (ingest, recommend, check, etc.).

pub mod catalog;
pub mod check;
pub mod ingest;
pub mod recommend;
pub mod repl;

use anyhow::{Context, Result};
use std::path::Path;

use crate::storage::Database;
use crate::ui;

/// Open (and create if needed) the store for a command
pub fn open_database(path: &Path) -> Result<Database> {
	ui::debug(&format!("Opening database {}", path.display()));
	Database::open(path).with_context(|| format!("cannot open database {}", path.display()))
}
