//! Excel exporter implementation - flat locale maps → Excel (.xlsx)

use crate::error::{LocaleError, LocaleResult};
use crate::types::{fits_in_f64, FlatMap, LangId, Leaf, SheetRow, KEY_COLUMN};
use indexmap::{IndexMap, IndexSet};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Name of the single worksheet in the exported workbook
pub const SHEET_NAME: &str = "i18n";

const KEY_COLUMN_WIDTH: f64 = 40.0;
const LANG_COLUMN_WIDTH: f64 = 30.0;

/// Merge per-language flat maps into one row per distinct key.
///
/// Rows follow the order in which keys first appear, scanning languages in order.
/// A language that lacks a key gets an empty value in that row.
pub fn build_rows(languages: &IndexMap<LangId, FlatMap>) -> Vec<SheetRow> {
    let keys: IndexSet<&String> = languages.values().flat_map(|flat| flat.keys()).collect();

    keys.into_iter()
        .map(|key| SheetRow {
            key: key.clone(),
            values: languages
                .iter()
                .map(|(lang, flat)| {
                    let value = flat.get(key).cloned().unwrap_or_else(Leaf::empty);
                    (lang.clone(), value)
                })
                .collect(),
        })
        .collect()
}

/// Move rows with any untranslated value ahead of complete rows, keeping relative order
pub fn sort_untranslated_first(rows: &mut [SheetRow]) {
    rows.sort_by_key(|row| !row.has_untranslated());
}

/// Excel exporter for the translator spreadsheet
pub struct SheetExporter {
    languages: Vec<LangId>,
    rows: Vec<SheetRow>,
}

impl SheetExporter {
    /// Create a new Excel exporter. Columns are `key` followed by `languages` in order.
    pub fn new(languages: Vec<LangId>, rows: Vec<SheetRow>) -> Self {
        Self { languages, rows }
    }

    /// Write the workbook, replacing any existing file at `output_path`
    pub fn export(&self, output_path: &Path) -> LocaleResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| LocaleError::Export(format!("Failed to set worksheet name: {}", e)))?;

        self.write_header(worksheet)?;

        for (row_idx, row) in self.rows.iter().enumerate() {
            let excel_row = (row_idx + 1) as u32;
            worksheet
                .write_string(excel_row, 0, &row.key)
                .map_err(|e| LocaleError::Export(format!("Failed to write key: {}", e)))?;

            for (lang_idx, lang) in self.languages.iter().enumerate() {
                Self::write_cell_value(worksheet, excel_row, (lang_idx + 1) as u16, &row.value(lang))?;
            }
        }

        workbook
            .save(output_path)
            .map_err(|e| LocaleError::Export(format!("Failed to save Excel file: {}", e)))?;

        Ok(())
    }

    fn write_header(&self, worksheet: &mut Worksheet) -> LocaleResult<()> {
        let bold = Format::new().set_bold();
        let headers = std::iter::once(KEY_COLUMN).chain(self.languages.iter().map(String::as_str));

        for (col_idx, name) in headers.enumerate() {
            let width = if col_idx == 0 {
                KEY_COLUMN_WIDTH
            } else {
                LANG_COLUMN_WIDTH
            };
            worksheet
                .write_string_with_format(0, col_idx as u16, name, &bold)
                .map_err(|e| LocaleError::Export(format!("Failed to write header: {}", e)))?;
            worksheet
                .set_column_width(col_idx as u16, width)
                .map_err(|e| LocaleError::Export(format!("Failed to set column width: {}", e)))?;
        }

        worksheet
            .set_freeze_panes(1, 0)
            .map_err(|e| LocaleError::Export(format!("Failed to freeze header: {}", e)))?;
        Ok(())
    }

    /// Write a leaf with its matching cell type. Untranslated values stay blank.
    /// Integers wider than an f64 mantissa are written as their digits.
    fn write_cell_value(
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &Leaf,
    ) -> LocaleResult<()> {
        let result = match value {
            Leaf::Text(s) if s.is_empty() => return Ok(()),
            Leaf::Text(s) => worksheet.write_string(row, col, s),
            Leaf::Number(n) => match n.as_f64() {
                Some(f) if fits_in_f64(n) => worksheet.write_number(row, col, f),
                _ => worksheet.write_string(row, col, &n.to_string()),
            },
            Leaf::Bool(b) => worksheet.write_boolean(row, col, *b),
        };
        result
            .map(|_| ())
            .map_err(|e| LocaleError::Export(format!("Failed to write cell: {}", e)))
    }
}
