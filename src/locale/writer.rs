//! Locale writer - one `<lang>.json` and one `<lang>.js` per language

use crate::error::{LocaleError, LocaleResult};
use crate::types::{LocaleSet, LocaleTree};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Files produced for one language
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenLocale {
    pub lang: String,
    pub json_path: PathBuf,
    pub js_path: PathBuf,
    pub leaf_count: usize,
}

/// Writes locale trees into a directory
pub struct LocaleWriter {
    dir: PathBuf,
}

impl LocaleWriter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Create the directory if needed and write every language in order.
    ///
    /// All language ids are checked before anything touches the disk. An IO failure
    /// stops the run; files already written stay on disk. `on_written` is called after
    /// each language's files are written.
    pub fn write_all<F>(
        &self,
        locales: &LocaleSet,
        mut on_written: F,
    ) -> LocaleResult<Vec<WrittenLocale>>
    where
        F: FnMut(&WrittenLocale),
    {
        for lang in locales.keys() {
            validate_lang_id(lang)?;
        }

        fs::create_dir_all(&self.dir)?;

        let mut written = Vec::with_capacity(locales.len());
        for (lang, tree) in locales {
            let locale = self.write_locale(lang, tree)?;
            on_written(&locale);
            written.push(locale);
        }
        Ok(written)
    }

    pub fn write_locale(&self, lang: &str, tree: &LocaleTree) -> LocaleResult<WrittenLocale> {
        validate_lang_id(lang)?;

        let json = serde_json::to_string_pretty(tree)?;

        let json_path = self.dir.join(format!("{}.json", lang));
        fs::write(&json_path, &json)?;

        let js_path = self.dir.join(format!("{}.js", lang));
        fs::write(&js_path, render_js_module(lang, &json))?;

        info!(lang, path = %json_path.display(), "locale written");

        Ok(WrittenLocale {
            lang: lang.to_string(),
            json_path,
            js_path,
            leaf_count: tree.leaf_count(),
        })
    }
}

/// Language ids become file names, so they must stay inside the target directory
fn validate_lang_id(lang: &str) -> LocaleResult<()> {
    if lang.is_empty() || lang == "." || lang == ".." || lang.contains(['/', '\\']) {
        return Err(LocaleError::Export(format!(
            "'{}' cannot be used as a locale file name",
            lang
        )));
    }
    Ok(())
}

/// JS identifier for a language id: `zh-CN` → `zhCN`
pub fn module_var_name(lang: &str) -> String {
    let name: String = lang
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    match name.chars().next() {
        None => "_".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{}", name),
        Some(_) => name,
    }
}

/// CommonJS module exporting the same document as the `.json` file
pub fn render_js_module(lang: &str, json: &str) -> String {
    let var = module_var_name(lang);
    format!("const {var} = {json};\nmodule.exports = {var};\n")
}
