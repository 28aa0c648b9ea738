//! Input and output locations for a run

use std::path::{Path, PathBuf};

/// Directory holding the per-product process sheets
pub const DEFAULT_INPUT_DIR: &str = "fichas";

/// BOM workbook
pub const DEFAULT_BOM_FILE: &str = "data/bom.xlsx";

/// Directory receiving the two bulk import files
pub const DEFAULT_OUTPUT_DIR: &str = "bulk_import";

/// Extension (without dot) a file needs to be read as a process sheet
pub const SHEET_EXTENSION: &str = "xlsx";

/// Pipeline paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub bom_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            bom_path: PathBuf::from(DEFAULT_BOM_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl PipelineConfig {
    /// Default layout resolved under `root`
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            input_dir: root.join(DEFAULT_INPUT_DIR),
            bom_path: root.join(DEFAULT_BOM_FILE),
            output_dir: root.join(DEFAULT_OUTPUT_DIR),
        }
    }
}
