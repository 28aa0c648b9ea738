use std::path::PathBuf;
use thiserror::Error;

pub type ImportResult<T> = Result<T, ImportError>;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input directory does not exist: {}", .0.display())]
    InputDirMissing(PathBuf),

    #[error("Workbook error in {}: {message}", path.display())]
    Workbook { path: PathBuf, message: String },

    #[error("Workbook has no worksheets: {}", .0.display())]
    NoWorksheet(PathBuf),

    #[error("No process template declares product code '{0}'")]
    UnmatchedProductCode(String),
}

impl ImportError {
    /// Wrap a calamine error with the workbook path it came from
    pub fn workbook(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        ImportError::Workbook {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
