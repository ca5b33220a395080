//! The two conversion pipelines
//!
//! Each run selects one direction, builds everything in memory, and writes its output
//! once. Nothing is shared between the two directions except the key path convention.

use crate::config::Config;
use crate::error::LocaleResult;
use crate::excel::{build_locale_set, build_rows, sort_untranslated_first, SheetExporter, SheetImporter};
use crate::locale::{LocaleFailure, LocaleReader, LocaleWriter, WrittenLocale};
use crate::types::LangId;
use indexmap::IndexMap;
use std::path::PathBuf;
use tracing::debug;

/// Outcome of spreadsheet → locale files
#[derive(Debug)]
pub struct ImportSummary {
    pub source: PathBuf,
    /// Rows that carried a key
    pub rows: usize,
    pub written: Vec<WrittenLocale>,
}

/// Outcome of locale files → spreadsheet
#[derive(Debug)]
pub struct ExportSummary {
    pub output: PathBuf,
    pub languages: Vec<LangId>,
    /// File each language column was read from
    pub sources: IndexMap<LangId, PathBuf>,
    pub rows: usize,
    pub untranslated_rows: usize,
    /// Files that could not be read; their columns are empty
    pub failures: Vec<LocaleFailure>,
}

/// Read the spreadsheet and write `<lang>.json` / `<lang>.js` for every language column.
///
/// `on_written` is called after each language's files are on disk.
pub fn xlsx_to_locales<F>(config: &Config, on_written: F) -> LocaleResult<ImportSummary>
where
    F: FnMut(&WrittenLocale),
{
    let table = SheetImporter::new(&config.xlsx_path).import()?;
    debug!(
        rows = table.rows.len(),
        languages = ?table.languages,
        "spreadsheet loaded"
    );

    let locales = build_locale_set(&table)?;

    let written = LocaleWriter::new(&config.locales_dir).write_all(&locales, on_written)?;

    Ok(ImportSummary {
        source: config.xlsx_path.clone(),
        rows: table.rows.len(),
        written,
    })
}

/// Scan the locale directory and write a single-sheet workbook, untranslated rows first.
///
/// Unreadable locale files are reported in the summary instead of aborting the run.
pub fn locales_to_xlsx(config: &Config) -> LocaleResult<ExportSummary> {
    let scan = LocaleReader::new(&config.locales_dir)
        .with_js_modules(config.js_modules)
        .read_all()?;

    let mut rows = build_rows(&scan.languages);
    sort_untranslated_first(&mut rows);
    let untranslated_rows = rows.iter().filter(|row| row.has_untranslated()).count();

    let languages: Vec<LangId> = scan.languages.keys().cloned().collect();
    let row_count = rows.len();
    debug!(rows = row_count, untranslated_rows, "rows merged");

    SheetExporter::new(languages.clone(), rows).export(&config.xlsx_path)?;

    Ok(ExportSummary {
        output: config.xlsx_path.clone(),
        languages,
        sources: scan.sources,
        rows: row_count,
        untranslated_rows,
        failures: scan.failures,
    })
}
