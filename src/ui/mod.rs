//! # User Interface
//!
//! Colored terminal output, verbose-gated debug lines and summaries.

pub mod log;

pub use log::{debug, error, header, info, path_link, print_logo, score, success, summary, warn, Log};
