//! Offline ingestion and catalog consistency checks

pub mod drift;
pub mod ingest;

pub use drift::{check, DriftReport};
pub use ingest::{run, CoverageReport, IngestError, IngestOptions, IngestReport, Stage};
