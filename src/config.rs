//! Application configuration and constants

use std::path::{Path, PathBuf};

// === Environment ===
pub const DB_ENV: &str = "SOMMELIER_DB";
pub const EMBEDDINGS_ENV: &str = "SOMMELIER_EMBEDDINGS";

// === Storage ===
pub const DEFAULT_DB_FILE: &str = "sommelier.db";

// === Embedding Source ===
pub const DEFAULT_EMBEDDINGS_FILE: &str = "glove.6B.50d.txt";

// === Recommendation Defaults ===
pub const DEFAULT_LIMIT: usize = 5;
pub const LOW_SCORE_THRESHOLD: f32 = 0.25;
pub const STRONG_SCORE_THRESHOLD: f32 = 0.9;

/// Database path: explicit flag, then SOMMELIER_DB, then ./sommelier.db
pub fn database_path(custom: Option<&Path>) -> PathBuf {
	if let Some(custom) = custom {
		crate::ui::debug(&format!("Using database: {}", custom.display()));
		return custom.to_path_buf();
	}

	if let Ok(env_path) = std::env::var(DB_ENV) {
		if !env_path.trim().is_empty() {
			crate::ui::debug(&format!("Using {}: {}", DB_ENV, env_path));
			return PathBuf::from(env_path);
		}
	}

	PathBuf::from(DEFAULT_DB_FILE)
}

/// Embedding source path: explicit flag, then SOMMELIER_EMBEDDINGS, then
/// a GloVe file next to the executable or in the working directory
pub fn embeddings_path(custom: Option<&Path>) -> Option<PathBuf> {
	if let Some(custom) = custom {
		return Some(custom.to_path_buf());
	}

	if let Ok(env_path) = std::env::var(EMBEDDINGS_ENV) {
		let path = PathBuf::from(&env_path);
		if path.is_file() {
			crate::ui::debug(&format!("Using {}: {}", EMBEDDINGS_ENV, env_path));
			return Some(path);
		}
	}

	if let Ok(exe) = std::env::current_exe() {
		if let Some(dir) = exe.parent() {
			let candidate = dir.join(DEFAULT_EMBEDDINGS_FILE);
			if candidate.is_file() {
				crate::ui::debug(&format!("Found embeddings at: {}", candidate.display()));
				return Some(candidate);
			}
		}
	}

	let local = PathBuf::from(DEFAULT_EMBEDDINGS_FILE);
	local.is_file().then_some(local)
}
