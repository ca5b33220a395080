//! Locale reader - per-language files → flat key maps
//!
//! `.json` files are always read. `.js` files are only considered when enabled, and only
//! in the data-only form the writer produces (`const x = {...}; module.exports = x;`).
//! They are parsed as JSON, never evaluated.

use crate::core::keypath::flatten;
use crate::error::{LocaleError, LocaleResult};
use crate::types::{FlatMap, LangId, LocaleTree, KEY_COLUMN};
use indexmap::IndexMap;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Locale file flavours, in ascending precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LocaleFormat {
    JsModule,
    Json,
}

impl LocaleFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(LocaleFormat::Json),
            "js" => Some(LocaleFormat::JsModule),
            _ => None,
        }
    }
}

/// A locale file that could not be loaded
#[derive(Debug)]
pub struct LocaleFailure {
    pub lang: LangId,
    pub path: PathBuf,
    pub error: LocaleError,
}

/// Result of scanning a locale directory
#[derive(Debug, Default)]
pub struct LocaleScan {
    /// Flat maps per language, sorted by language id. Failed files map to an empty map.
    pub languages: IndexMap<LangId, FlatMap>,
    /// File each language was read from
    pub sources: IndexMap<LangId, PathBuf>,
    pub failures: Vec<LocaleFailure>,
}

/// Reads every locale file in a directory
pub struct LocaleReader {
    dir: PathBuf,
    js_modules: bool,
}

impl LocaleReader {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            js_modules: false,
        }
    }

    /// Also read `.js` locale modules
    pub fn with_js_modules(mut self, enabled: bool) -> Self {
        self.js_modules = enabled;
        self
    }

    /// Pick one file per language id. `.json` beats `.js` for the same id.
    /// A file named after the reserved `key` column is skipped.
    pub fn discover(&self) -> LocaleResult<BTreeMap<LangId, (LocaleFormat, PathBuf)>> {
        let mut found: BTreeMap<LangId, (LocaleFormat, PathBuf)> = BTreeMap::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(format) = LocaleFormat::from_path(&path) else {
                continue;
            };
            if format == LocaleFormat::JsModule && !self.js_modules {
                debug!(path = %path.display(), "skipping .js locale (js modules disabled)");
                continue;
            }
            let Some(lang) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
            else {
                continue;
            };
            if lang == KEY_COLUMN {
                warn!(path = %path.display(), "file name is reserved for the key column, skipping");
                continue;
            }

            let shadowed = found
                .get(&lang)
                .is_some_and(|(existing, _)| *existing >= format);
            if shadowed {
                debug!(lang = %lang, path = %path.display(), "shadowed by higher-precedence file");
            } else {
                found.insert(lang, (format, path));
            }
        }

        Ok(found)
    }

    /// Read and flatten all locale files. Per-file errors are collected, not raised.
    pub fn read_all(&self) -> LocaleResult<LocaleScan> {
        let mut scan = LocaleScan::default();

        for (lang, (format, path)) in self.discover()? {
            let flat = read_locale_file(&path, format).and_then(|tree| flatten(&tree, None));
            let flat = match flat {
                Ok(flat) => flat,
                Err(error) => {
                    debug!(lang = %lang, path = %path.display(), %error, "failed to read locale file");
                    scan.failures.push(LocaleFailure {
                        lang: lang.clone(),
                        path: path.clone(),
                        error,
                    });
                    FlatMap::new()
                }
            };
            scan.languages.insert(lang.clone(), flat);
            scan.sources.insert(lang, path);
        }

        Ok(scan)
    }
}

/// Load one locale file into a tree
pub fn read_locale_file(path: &Path, format: LocaleFormat) -> LocaleResult<LocaleTree> {
    let content = fs::read_to_string(path)?;
    let value = match format {
        LocaleFormat::Json => serde_json::from_str(&content)?,
        LocaleFormat::JsModule => parse_js_module(&content)?,
    };
    LocaleTree::from_json(value).ok_or_else(|| {
        LocaleError::Import(format!(
            "{}: top-level value must be an object",
            path.display()
        ))
    })
}

/// Extract the exported JSON literal from a data-only CommonJS module
pub fn parse_js_module(source: &str) -> LocaleResult<serde_json::Value> {
    let pattern = Regex::new(
        r"(?s)^\s*(?:const|let|var)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*(.*?);?\s*module\.exports\s*=\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*;?\s*$",
    )
    .map_err(|e| LocaleError::Import(format!("Regex error: {}", e)))?;

    let captures = pattern.captures(source).ok_or_else(|| {
        LocaleError::Import(
            "unsupported JS module: expected `const x = {...}; module.exports = x;`".to_string(),
        )
    })?;

    let declared = &captures[1];
    let exported = &captures[3];
    if declared != exported {
        return Err(LocaleError::Import(format!(
            "module declares '{}' but exports '{}'",
            declared, exported
        )));
    }

    serde_json::from_str(&captures[2]).map_err(|e| {
        LocaleError::Import(format!("module body is not a JSON literal: {}", e))
    })
}
