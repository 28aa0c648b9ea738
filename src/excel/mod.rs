//! Excel readers for process sheets and the BOM workbook
//!
//! - `grid`: cell access and coercion over the first worksheet
//! - `sheet`: process sheet → template + steps
//! - `bom`: BOM product-code row → occurrence-numbered entries

pub mod bom;
pub mod grid;
pub mod sheet;

pub use bom::BomScanner;
pub use grid::Grid;
pub use sheet::SheetExtractor;
