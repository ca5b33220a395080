//! i18n-forge - translator spreadsheet ↔ per-language locale files
//!
//! Translators edit one `.xlsx` sheet with a `key` column and one column per
//! language. Developers consume nested `<lang>.json` / `<lang>.js` files.
//! This library converts in either direction.
//!
//! # Features
//!
//! - Dotted keys (`greeting.hello`) ↔ nested JSON objects
//! - First-worksheet import with typed cells (text, numbers, booleans)
//! - Single `i18n` worksheet export, untranslated rows first
//! - Per-file error tolerance when reading locale directories
//!
//! # Example
//!
//! ```no_run
//! use i18n_forge::config::Config;
//! use i18n_forge::core::{locales_to_xlsx, xlsx_to_locales};
//!
//! let config = Config::new("locale.xlsx", "locales");
//!
//! let summary = xlsx_to_locales(&config, |written| println!("wrote {}", written.lang))?;
//! println!("Rows: {}", summary.rows);
//!
//! let summary = locales_to_xlsx(&config)?;
//! println!("Untranslated: {}", summary.untranslated_rows);
//! # Ok::<(), i18n_forge::error::LocaleError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod locale;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{LocaleError, LocaleResult};
pub use types::{FlatMap, Leaf, LocaleNode, LocaleSet, LocaleTree, SheetRow, SheetTable};
