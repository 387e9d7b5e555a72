// Integration tests for the sommelier binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const WINES: &str = r#"[
    {"id": 1, "name": "Herb Garden", "type": "white", "variety": "sauvignon", "year": 2019,
     "region": "loire", "price": 18, "topnote": "herbaceous", "bottomnote": "crisp"},
    {"id": 2, "name": "Cellar Door", "type": "red", "variety": "cabernet", "year": 2012,
     "region": "napa", "price": 55, "topnote": "oak", "bottomnote": "tannic"}
]"#;

const GLOVE: &str = "\
white 0.9 0.1 0
sauvignon 0.8 0.2 0.1
loire 0.7 0.1 0.3
herbaceous 1 0 0
crisp 0.8 0 0.2
red 0 1 0
cabernet 0.1 0.9 0.1
napa 0 0.8 0.4
oak 0.1 0.7 0.5
tannic 0 0.9 0.3
";

fn sommelier(db: &Path, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_sommelier"))
		.arg("--db")
		.arg(db)
		.args(args)
		.env("NO_COLOR", "1")
		.output()
		.expect("Failed to run sommelier")
}

fn prepared() -> (tempfile::TempDir, std::path::PathBuf) {
	let dir = tempfile::tempdir().unwrap();
	let db = dir.path().join("wines.db");
	let wines = dir.path().join("wines.json");
	let glove = dir.path().join("glove.txt");
	fs::write(&wines, WINES).unwrap();
	fs::write(&glove, GLOVE).unwrap();

	let import = sommelier(&db, &["catalog", "import", wines.to_str().unwrap()]);
	assert!(import.status.success(), "Import failed: {}", String::from_utf8_lossy(&import.stderr));

	let ingest = sommelier(&db, &["ingest", "--embeddings", glove.to_str().unwrap()]);
	assert!(ingest.status.success(), "Ingest failed: {}", String::from_utf8_lossy(&ingest.stderr));
	let stdout = String::from_utf8_lossy(&ingest.stdout);
	assert!(stdout.contains("10/10 terms resolved"), "Unexpected ingest output:\n{}", stdout);

	(dir, db)
}

#[test]
fn test_version_display() {
	let output = Command::new(env!("CARGO_BIN_EXE_sommelier"))
		.arg("--version")
		.output()
		.expect("Failed to run sommelier --version");

	assert!(output.status.success(), "Version command failed");
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("sommelier"), "Expected 'sommelier' in version output");
}

#[test]
fn test_help_display() {
	let output = Command::new(env!("CARGO_BIN_EXE_sommelier"))
		.arg("--help")
		.output()
		.expect("Failed to run sommelier --help");

	assert!(output.status.success(), "Help command failed");
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(
		stdout.contains("ingest") && stdout.contains("recommend"),
		"Expected ingest and recommend in help output"
	);
}

#[test]
fn test_recommend_json() {
	let (_dir, db) = prepared();

	let output = sommelier(&db, &["recommend", "herbaceous", "mystery", "-n", "1", "--format", "json"]);
	assert!(output.status.success(), "Recommend failed");

	let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
	let data = body["data"].as_array().unwrap();
	assert_eq!(data.len(), 1);
	assert_eq!(data[0]["item_id"], 1);
	assert_eq!(data[0]["wine_name"], "Herb Garden");
	assert_eq!(body["unresolved"][0], "mystery");
}

#[test]
fn test_recommend_payload() {
	let (_dir, db) = prepared();

	let ok = sommelier(&db, &["recommend", "--json", r#"{"preferences": {"wood": "oak"}, "count": 2}"#]);
	assert!(ok.status.success());
	let body: serde_json::Value = serde_json::from_slice(&ok.stdout).unwrap();
	assert_eq!(body["data"][0]["item_id"], 2);

	let bad = sommelier(&db, &["recommend", "--json", r#"{"preferences": {"wood": "oak"}, "count": 0}"#]);
	assert!(!bad.status.success(), "Zero count must be rejected");
	assert!(String::from_utf8_lossy(&bad.stdout).contains("error"));
}

#[test]
fn test_check_and_remove() {
	let (_dir, db) = prepared();

	let check = sommelier(&db, &["check"]);
	assert!(check.status.success(), "Fresh ingestion should pass the drift check");
	assert!(String::from_utf8_lossy(&check.stdout).contains("PASS"));

	let remove = sommelier(&db, &["catalog", "remove", "2"]);
	assert!(remove.status.success());
	assert!(String::from_utf8_lossy(&remove.stdout).contains("and its vector"));

	let missing = sommelier(&db, &["catalog", "remove", "2"]);
	assert!(!missing.status.success(), "Removing an unknown wine must fail");
}

#[test]
fn test_vocabulary_listing() {
	let (_dir, db) = prepared();

	let output = sommelier(&db, &["catalog", "vocabulary"]);
	assert!(output.status.success());
	let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
	assert_eq!(body["type"], serde_json::json!(["red", "white"]));
	assert_eq!(body["region"], serde_json::json!(["loire", "napa"]));
}
