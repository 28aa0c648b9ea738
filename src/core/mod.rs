//! Template catalog and BOM expansion

pub mod catalog;
pub mod expansion;

pub use catalog::TemplateCatalog;
pub use expansion::{expand, Expansion};
