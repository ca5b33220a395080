//! Excel importer implementation - Excel (.xlsx) → locale trees

use crate::core::keypath::set_path;
use crate::error::{LocaleError, LocaleResult};
use crate::types::{LangId, Leaf, LocaleSet, LocaleTree, SheetRow, SheetTable, KEY_COLUMN};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Excel importer for the translator spreadsheet
pub struct SheetImporter {
    path: PathBuf,
}

impl SheetImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the first worksheet, whatever its name
    pub fn import(&self) -> LocaleResult<SheetTable> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            LocaleError::Import(format!(
                "Failed to open Excel file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| {
                LocaleError::Import(format!("{} contains no worksheets", self.path.display()))
            })?
            .map_err(|e| LocaleError::Import(format!("Failed to read first worksheet: {}", e)))?;

        self.read_table(&range)
    }

    /// Interpret a worksheet range as a header row followed by data rows
    fn read_table(&self, range: &Range<Data>) -> LocaleResult<SheetTable> {
        let mut rows = range.rows();

        let Some(header) = rows.next() else {
            return Err(LocaleError::Import(format!(
                "{}: first worksheet is empty",
                self.path.display()
            )));
        };

        let mut key_col = None;
        let mut lang_cols: Vec<(usize, LangId)> = Vec::new();
        for (col, cell) in header.iter().enumerate() {
            let name = Self::cell_text(cell);
            if name.is_empty() {
                continue;
            }
            if name == KEY_COLUMN {
                if key_col.is_none() {
                    key_col = Some(col);
                }
                continue;
            }
            if lang_cols.iter().any(|(_, lang)| *lang == name) {
                warn!(column = col, language = %name, "duplicate language column ignored");
                continue;
            }
            lang_cols.push((col, name));
        }

        let key_col = key_col.ok_or_else(|| {
            LocaleError::Import(format!(
                "{}: header row has no '{}' column",
                self.path.display(),
                KEY_COLUMN
            ))
        })?;

        let mut table = SheetTable {
            languages: lang_cols.iter().map(|(_, lang)| lang.clone()).collect(),
            rows: Vec::new(),
        };

        for (row_idx, cells) in rows.enumerate() {
            let key = cells
                .get(key_col)
                .map(Self::cell_text)
                .unwrap_or_default();
            if key.is_empty() {
                debug!(row = row_idx + 2, "row without key skipped");
                continue;
            }

            let mut row = SheetRow::new(key);
            for (col, lang) in &lang_cols {
                let value = cells.get(*col).map(Self::cell_to_leaf).unwrap_or_else(Leaf::empty);
                row.values.insert(lang.clone(), value);
            }
            table.rows.push(row);
        }

        Ok(table)
    }

    /// Header and key cells as trimmed text
    fn cell_text(cell: &Data) -> String {
        match cell {
            Data::String(s) => s.trim().to_string(),
            Data::Float(f) => Leaf::from_f64(*f).to_string(),
            Data::Empty | Data::Error(_) => String::new(),
            other => other.to_string().trim().to_string(),
        }
    }

    /// Convert a value cell, keeping numbers and booleans typed
    fn cell_to_leaf(cell: &Data) -> Leaf {
        match cell {
            Data::String(s) => {
                Leaf::from_wide_integer_text(s).unwrap_or_else(|| Leaf::Text(s.clone()))
            }
            Data::Int(i) => Leaf::Number((*i).into()),
            Data::Float(f) => Leaf::from_f64(*f),
            Data::Bool(b) => Leaf::Bool(*b),
            Data::Empty | Data::Error(_) => Leaf::empty(),
            other => Leaf::Text(other.to_string()),
        }
    }
}

/// Build one locale tree per language column.
///
/// Each language is folded from the rows into its own fresh tree. Languages only
/// appear once at least one keyed row exists.
pub fn build_locale_set(table: &SheetTable) -> LocaleResult<LocaleSet> {
    if table.rows.is_empty() {
        return Ok(LocaleSet::new());
    }

    table
        .languages
        .iter()
        .map(|lang| -> LocaleResult<(LangId, LocaleTree)> {
            let tree = table
                .rows
                .iter()
                .try_fold(LocaleTree::new(), |mut tree, row| {
                    set_path(&mut tree, &row.key, row.value(lang))?;
                    Ok::<_, LocaleError>(tree)
                })?;
            Ok((lang.clone(), tree))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_importer() -> SheetImporter {
        SheetImporter::new(PathBuf::from("test.xlsx"))
    }

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    fn range_from(rows: Vec<Vec<Data>>) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height.saturating_sub(1), width.saturating_sub(1)));
        for (r, row) in rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                range.set_value((r as u32, c as u32), cell);
            }
        }
        range
    }

    #[test]
    fn test_cell_to_leaf() {
        assert_eq!(SheetImporter::cell_to_leaf(&s("Hi")), Leaf::from("Hi"));
        assert_eq!(SheetImporter::cell_to_leaf(&Data::Int(4)), Leaf::Number(4.into()));
        assert_eq!(SheetImporter::cell_to_leaf(&Data::Float(2.0)), Leaf::Number(2.into()));
        assert_eq!(SheetImporter::cell_to_leaf(&Data::Bool(true)), Leaf::Bool(true));
        assert_eq!(SheetImporter::cell_to_leaf(&Data::Empty), Leaf::empty());
        assert_eq!(SheetImporter::cell_to_leaf(&s("0042")), Leaf::from("0042"));
        assert_eq!(
            SheetImporter::cell_to_leaf(&s("9007199254740993")),
            Leaf::Number(9007199254740993u64.into())
        );
    }

    #[test]
    fn test_cell_text_trims_and_formats_numbers() {
        assert_eq!(SheetImporter::cell_text(&s("  en ")), "en");
        assert_eq!(SheetImporter::cell_text(&Data::Float(12.0)), "12");
        assert_eq!(SheetImporter::cell_text(&Data::Empty), "");
    }

    #[test]
    fn test_read_table_skips_rows_without_key() {
        let range = range_from(vec![
            vec![s("key"), s("en"), s("zh")],
            vec![s("greeting.hello"), s("Hello"), s("你好")],
            vec![Data::Empty, s("orphan"), s("孤儿")],
            vec![s("greeting.bye"), Data::Empty, s("再见")],
        ]);

        let table = create_test_importer().read_table(&range).unwrap();

        assert_eq!(table.languages, vec!["en", "zh"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].key, "greeting.bye");
        assert_eq!(table.rows[1].value("en"), Leaf::empty());
    }

    #[test]
    fn test_read_table_key_column_anywhere() {
        let range = range_from(vec![
            vec![s("en"), s("key")],
            vec![s("Hello"), s("hello")],
        ]);
        let table = create_test_importer().read_table(&range).unwrap();
        assert_eq!(table.languages, vec!["en"]);
        assert_eq!(table.rows[0].key, "hello");
        assert_eq!(table.rows[0].value("en"), Leaf::from("Hello"));
    }

    #[test]
    fn test_read_table_without_key_header_fails() {
        let range = range_from(vec![vec![s("id"), s("en")], vec![s("a"), s("A")]]);
        let result = create_test_importer().read_table(&range);
        assert!(matches!(result, Err(LocaleError::Import(_))));
    }

    #[test]
    fn test_read_table_ignores_blank_and_duplicate_headers() {
        let range = range_from(vec![
            vec![s("key"), Data::Empty, s("en"), s("en")],
            vec![s("a"), s("ignored"), s("first"), s("second")],
        ]);
        let table = create_test_importer().read_table(&range).unwrap();
        assert_eq!(table.languages, vec!["en"]);
        assert_eq!(table.rows[0].value("en"), Leaf::from("first"));
    }

    #[test]
    fn test_build_locale_set() {
        let table = SheetTable {
            languages: vec!["en".to_string(), "zh".to_string()],
            rows: vec![
                SheetRow::new("greeting.hello")
                    .with_value("en", "Hello")
                    .with_value("zh", "你好"),
                SheetRow::new("greeting.bye")
                    .with_value("en", "")
                    .with_value("zh", "再见"),
            ],
        };

        let set = build_locale_set(&table).unwrap();

        assert_eq!(
            set["en"].to_json(),
            json!({"greeting": {"hello": "Hello", "bye": ""}})
        );
        assert_eq!(
            set["zh"].to_json(),
            json!({"greeting": {"hello": "你好", "bye": "再见"}})
        );
    }

    #[test]
    fn test_build_locale_set_without_rows_is_empty() {
        let table = SheetTable {
            languages: vec!["en".to_string()],
            rows: vec![],
        };
        assert!(build_locale_set(&table).unwrap().is_empty());
    }

    #[test]
    fn test_build_locale_set_rejects_malformed_key() {
        let table = SheetTable {
            languages: vec!["en".to_string()],
            rows: vec![SheetRow::new("a..b").with_value("en", "x")],
        };
        assert!(matches!(
            build_locale_set(&table),
            Err(LocaleError::InvalidKey { .. })
        ));
    }
}
