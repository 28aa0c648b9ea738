//! Addressable view over the first worksheet of a workbook

use crate::error::{ImportError, ImportResult};
use calamine::{open_workbook, Data, Range, Reader, Xlsx, XlsxError};
use std::path::Path;

/// Cell grid of one worksheet, addressed by absolute (row, column)
#[derive(Debug, Clone)]
pub struct Grid {
    range: Range<Data>,
}

impl Grid {
    pub fn new(range: Range<Data>) -> Self {
        Self { range }
    }

    /// Open a workbook and load its first worksheet
    pub fn open_first_sheet(path: &Path) -> ImportResult<Self> {
        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|e: XlsxError| ImportError::workbook(path, e))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::NoWorksheet(path.to_path_buf()))?
            .map_err(|e| ImportError::workbook(path, e))?;

        Ok(Self::new(range))
    }

    /// Raw value at (row, col); `None` for empty or out-of-range cells
    pub fn get(&self, row: u32, col: u32) -> Option<&Data> {
        match self.range.get_value((row, col)) {
            None | Some(Data::Empty) => None,
            Some(cell) => Some(cell),
        }
    }

    /// Trimmed text at (row, col), empty for falsy cells
    pub fn text(&self, row: u32, col: u32) -> String {
        cell_text(self.get(row, col))
    }

    /// Last populated row index, `None` for an empty sheet
    pub fn last_row(&self) -> Option<u32> {
        self.range.end().map(|(row, _)| row)
    }
}

/// Whether a cell counts as present: non-empty text, non-zero number, `true`
pub fn is_truthy(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => false,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => !s.is_empty(),
        Data::Int(i) => *i != 0,
        Data::Float(f) => *f != 0.0 && !f.is_nan(),
        Data::Bool(b) => *b,
        Data::DateTime(dt) => dt.as_f64() != 0.0,
    }
}

/// Stringify a cell without trimming
pub fn raw_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
    }
}

/// Coerce an optional cell to a trimmed string; falsy cells become ""
pub fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        Some(cell) if is_truthy(cell) => raw_text(cell).trim().to_string(),
        _ => String::new(),
    }
}
