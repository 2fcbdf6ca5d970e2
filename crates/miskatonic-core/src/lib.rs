//! Record-linkage core for bulk question imports.
//!
//! Rows flow through [`cleaner`] → [`subject`] → [`merger`], driven by a
//! [`pipeline::Pipeline`] that owns all per-run state. Storage is left to
//! the caller: the pipeline only returns canonical questions and counters.

pub mod cleaner;
pub mod config;
pub mod csv_source;
pub mod error;
pub mod merger;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod similarity;
pub mod subject;

pub use config::{AppConfig, ImportConfig};
pub use error::ImportError;
pub use pipeline::{import_csv, import_file, run, ImportOutcome, Pipeline, RowOutcome};
