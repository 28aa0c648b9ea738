//! Bulk Import - process sheets × BOM → bulk import CSV files
//!
//! Reads a directory of per-product process sheets (one `.xlsx` per base
//! product), expands each sheet once per occurrence of its product code in a
//! BOM workbook, and writes two semicolon-delimited files for the downstream
//! manufacturing system:
//!
//! - `production_prodProcess.csv`: one row per expanded process
//! - `production_prodProcessLine.csv`: one row per expanded step
//!
//! # Example
//!
//! ```no_run
//! use bulk_import::config::PipelineConfig;
//! use bulk_import::pipeline::run_expand;
//!
//! let report = run_expand(&PipelineConfig::default())?;
//!
//! println!("Processes: {}", report.processes_written);
//! println!("Steps: {}", report.steps_written);
//! # Ok::<(), bulk_import::error::ImportError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod logging;
pub mod pipeline;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{ImportError, ImportResult};
pub use types::{BomEntry, ExpandedProcess, ExpandedStep, ProcessTemplate, StepTemplate};
