//! Per-language locale files on disk

mod reader;
mod writer;

pub use reader::{
    parse_js_module, read_locale_file, LocaleFailure, LocaleFormat, LocaleReader, LocaleScan,
};
pub use writer::{module_var_name, render_js_module, LocaleWriter, WrittenLocale};
