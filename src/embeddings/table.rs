//! Pretrained term-vector table (GloVe text format)

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::term;
use crate::core::Embedding;
use crate::error::{Error, Result};
use crate::ui;

/// What to do with a line that does not parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
	/// Log the line, count it and keep loading
	#[default]
	Skip,
	/// Fail the whole load on the first bad line
	Abort,
}

/// A line rejected under [`MalformedPolicy::Skip`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
	pub line: usize,
	pub reason: String,
}

/// Statistics about a table load
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
	pub lines: usize,
	pub entries: usize,
	pub duplicates: usize,
	pub skipped: Vec<MalformedLine>,
}

/// Immutable mapping from lowercase term to a vector of fixed dimension
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
	vectors: HashMap<String, Embedding>,
	dimension: usize,
}

impl EmbeddingTable {
	/// Load a whitespace-delimited `term v1 .. vD` source from disk
	pub fn load(path: &Path, policy: MalformedPolicy, dimension: Option<usize>) -> Result<(Self, LoadReport)> {
		let file = File::open(path).map_err(|source| Error::SourceUnavailable {
			path: path.to_path_buf(),
			source,
		})?;

		Self::from_reader(BufReader::new(file), policy, dimension).map_err(|err| match err {
			// Read failures mid-file are still the source being unavailable
			Error::SourceUnavailable { source, .. } => Error::SourceUnavailable {
				path: path.to_path_buf(),
				source,
			},
			other => other,
		})
	}

	/// Parse a table from any buffered reader. The dimension is fixed by
	/// `dimension` when given, otherwise by the first well-formed line.
	pub fn from_reader<R: BufRead>(
		reader: R,
		policy: MalformedPolicy,
		dimension: Option<usize>,
	) -> Result<(Self, LoadReport)> {
		let mut vectors: HashMap<String, Embedding> = HashMap::new();
		let mut report = LoadReport::default();
		let mut dimension = dimension;

		for (index, line) in reader.lines().enumerate() {
			let line_no = index + 1;
			let line = line.map_err(|source| Error::SourceUnavailable {
				path: Default::default(),
				source,
			})?;
			report.lines = line_no;

			if line.trim().is_empty() {
				continue;
			}

			let (term, values) = match parse_line(&line, dimension) {
				Ok(parsed) => parsed,
				Err(reason) => match policy {
					MalformedPolicy::Abort => {
						return Err(Error::MalformedEntry { line: line_no, reason });
					}
					MalformedPolicy::Skip => {
						ui::debug(&format!("Skipping embedding line {}: {}", line_no, reason));
						report.skipped.push(MalformedLine { line: line_no, reason });
						continue;
					}
				},
			};

			if dimension.is_none() {
				dimension = Some(values.len());
			}

			let key = term::normalize(term);
			if vectors.contains_key(&key) {
				report.duplicates += 1;
				ui::debug(&format!("Duplicate term '{}' at line {} ignored", key, line_no));
				continue;
			}
			vectors.insert(key, Embedding::new(values));
		}

		report.entries = vectors.len();

		let table = Self {
			vectors,
			dimension: dimension.unwrap_or(0),
		};
		Ok((table, report))
	}

	/// Build a table from already validated pairs (e.g. a persisted subset)
	pub fn from_entries<I>(dimension: usize, entries: I) -> Result<Self>
	where
		I: IntoIterator<Item = (String, Embedding)>,
	{
		let mut vectors = HashMap::new();
		for (term, embedding) in entries {
			if embedding.dimension() != dimension {
				return Err(Error::DimensionMismatch {
					expected: dimension,
					actual: embedding.dimension(),
				});
			}
			vectors.entry(term::normalize(&term)).or_insert(embedding);
		}
		Ok(Self { vectors, dimension })
	}

	/// Exact lookup of an already normalized term
	pub fn get(&self, normalized: &str) -> Option<&Embedding> {
		self.vectors.get(normalized)
	}

	pub fn dimension(&self) -> usize {
		self.dimension
	}

	pub fn len(&self) -> usize {
		self.vectors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vectors.is_empty()
	}

	/// Terms in sorted order
	pub fn terms(&self) -> Vec<&str> {
		let mut terms: Vec<&str> = self.vectors.keys().map(String::as_str).collect();
		terms.sort_unstable();
		terms
	}
}

fn parse_line(line: &str, dimension: Option<usize>) -> std::result::Result<(&str, Vec<f32>), String> {
	let mut tokens = line.split_whitespace();
	let term = tokens.next().ok_or_else(|| "empty line".to_string())?;

	let mut values = Vec::with_capacity(dimension.unwrap_or(64));
	for (position, token) in tokens.enumerate() {
		let value: f32 = token
			.parse()
			.map_err(|_| format!("value {} '{}' is not a number", position + 1, token))?;
		if !value.is_finite() {
			return Err(format!("value {} '{}' is not finite", position + 1, token));
		}
		values.push(value);
	}

	if values.is_empty() {
		return Err(format!("term '{}' has no vector components", term));
	}

	if let Some(expected) = dimension {
		if values.len() != expected {
			return Err(format!(
				"term '{}' has {} components, expected {}",
				term,
				values.len(),
				expected
			));
		}
	}

	Ok((term, values))
}
