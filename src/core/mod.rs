//! Core conversion logic: key paths and the two conversion pipelines

pub mod convert;
pub mod keypath;

pub use convert::{locales_to_xlsx, xlsx_to_locales, ExportSummary, ImportSummary};
pub use keypath::{flatten, set_path, split_key, unflatten};
