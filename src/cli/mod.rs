//! CLI command handlers

pub mod commands;

pub use commands::{to_excel, to_locales};
