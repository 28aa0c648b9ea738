//! BOM scanner - reads the product-code row of the BOM workbook
//!
//! Codes sit in row 1 and display names in row 2, starting at column F.
//! Columns must be contiguous: the first empty code cell ends the scan.
//! Error cells (`#N/A`, `#REF!`) are not empty; they are read as their error
//! text, so the lookup for that code fails and the expansion reports it.

use crate::error::ImportResult;
use crate::excel::grid::{is_truthy, raw_text, Grid};
use crate::types::BomEntry;
use calamine::Data;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CODE_ROW: u32 = 1;
const NAME_ROW: u32 = 2;
const FIRST_COLUMN: u32 = 5;

/// Scans the BOM workbook into ordered, occurrence-numbered entries
pub struct BomScanner {
    path: PathBuf,
}

impl BomScanner {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn scan(&self) -> ImportResult<Vec<BomEntry>> {
        let grid = Grid::open_first_sheet(&self.path)?;
        let entries = scan_grid(&grid);

        debug!(
            file = %self.path.display(),
            entries = entries.len(),
            "scanned BOM workbook"
        );

        Ok(entries)
    }
}

/// Scan an already loaded BOM grid
pub fn scan_grid(grid: &Grid) -> Vec<BomEntry> {
    let mut entries = Vec::new();
    let mut occurrences: HashMap<String, usize> = HashMap::new();
    let mut col = FIRST_COLUMN;

    while let Some(code_cell) = grid.get(CODE_ROW, col).filter(|cell| is_code(cell)) {
        let code = match code_cell {
            Data::Error(err) => {
                warn!(row = CODE_ROW, col, error = %err, "error cell in BOM code row");
                err.to_string()
            }
            cell => raw_text(cell),
        };
        let display_name = grid.get(NAME_ROW, col).map(raw_text).unwrap_or_default();

        let counter = occurrences.entry(code.clone()).or_insert(1);
        let occurrence = *counter;
        *counter += 1;

        entries.push(BomEntry::new(code, occurrence, display_name));
        col += 1;
    }

    entries
}

/// A code cell continues the scan when truthy or when it holds an error
fn is_code(cell: &Data) -> bool {
    matches!(cell, Data::Error(_)) || is_truthy(cell)
}
