//! Process sheet extractor - one workbook → one template and its steps
//!
//! Sheet layout:
//! - rows 0-3: label in column A, value in column B
//!   (name, code, product code, workshop location)
//! - rows 6..: step rows, columns A-D
//!   (name, priority, work center code, description)

use crate::error::ImportResult;
use crate::excel::grid::Grid;
use crate::types::{ProcessTemplate, SheetTemplate, StepTemplate};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Number of label/value rows at the top of a sheet
const HEADER_ROWS: u32 = 4;

/// First row of the step block
const FIRST_STEP_ROW: u32 = 6;

/// One label/value pair of the header block
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderField {
    label: String,
    value: String,
}

/// Reads the process template and step rows out of a process sheet
pub struct SheetExtractor {
    path: PathBuf,
}

impl SheetExtractor {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn extract(&self) -> ImportResult<SheetTemplate> {
        let grid = Grid::open_first_sheet(&self.path)?;
        let sheet = extract_from_grid(&grid);

        debug!(
            file = %self.path.display(),
            code = %sheet.process.code,
            product_code = %sheet.process.product_code,
            steps = sheet.steps.len(),
            "extracted process sheet"
        );

        Ok(sheet)
    }
}

/// Extract a template from an already loaded grid
pub fn extract_from_grid(grid: &Grid) -> SheetTemplate {
    let header: Vec<HeaderField> = (0..HEADER_ROWS)
        .map(|row| HeaderField {
            label: grid.text(row, 0),
            value: grid.text(row, 1),
        })
        .collect();

    for (row, field) in header.iter().enumerate() {
        if field.value.is_empty() {
            debug!(row, label = %field.label, "header value is empty");
        }
    }

    let process = ProcessTemplate::new(
        header[0].value.clone(),
        header[1].value.clone(),
        header[2].value.clone(),
        header[3].value.clone(),
    );

    let steps = match grid.last_row() {
        Some(last_row) if last_row >= FIRST_STEP_ROW => (FIRST_STEP_ROW..=last_row)
            .map(|row| {
                StepTemplate::new(
                    process.code.clone(),
                    grid.text(row, 0),
                    grid.text(row, 1),
                    grid.text(row, 2),
                    grid.text(row, 3),
                )
            })
            .filter(|step| !step.is_blank())
            .collect(),
        _ => Vec::new(),
    };

    SheetTemplate { process, steps }
}
