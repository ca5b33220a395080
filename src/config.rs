//! Run configuration shared by both conversion directions

use std::path::{Path, PathBuf};

/// Default spreadsheet location, relative to the working directory
pub const DEFAULT_XLSX: &str = "locale.xlsx";

/// Default locale directory, relative to the working directory
pub const DEFAULT_LOCALES_DIR: &str = "locales";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Spreadsheet read by `--to-js` and written by `--to-excel`
    pub xlsx_path: PathBuf,
    /// Directory written by `--to-js` and scanned by `--to-excel`
    pub locales_dir: PathBuf,
    /// Read data-only `.js` locale modules in addition to `.json`
    pub js_modules: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            xlsx_path: PathBuf::from(DEFAULT_XLSX),
            locales_dir: PathBuf::from(DEFAULT_LOCALES_DIR),
            js_modules: false,
        }
    }
}

impl Config {
    pub fn new<X: AsRef<Path>, L: AsRef<Path>>(xlsx_path: X, locales_dir: L) -> Self {
        Self {
            xlsx_path: xlsx_path.as_ref().to_path_buf(),
            locales_dir: locales_dir.as_ref().to_path_buf(),
            js_modules: false,
        }
    }

    pub fn with_js_modules(mut self, enabled: bool) -> Self {
        self.js_modules = enabled;
        self
    }
}
