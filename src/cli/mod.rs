//! CLI command handlers

pub mod commands;

pub use commands::{expand, templates};
