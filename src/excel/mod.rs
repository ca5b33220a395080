//! Excel import/export for translator spreadsheets
//!
//! This module provides both directions of the spreadsheet side:
//! - Import: first worksheet of an .xlsx → rows → per-language locale trees
//! - Export: per-language flat maps → rows → single `i18n` worksheet

mod exporter;
mod importer;

pub use exporter::{build_rows, sort_untranslated_first, SheetExporter, SHEET_NAME};
pub use importer::{build_locale_set, SheetImporter};
