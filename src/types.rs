use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::fmt;

/// Language identifier, taken from a spreadsheet header or a locale file stem (`en`, `zh-CN`)
pub type LangId = String;

/// Flat key → leaf value, in first-insertion order
pub type FlatMap = IndexMap<String, Leaf>;

/// Language id → locale tree, in first-seen order
pub type LocaleSet = IndexMap<LangId, LocaleTree>;

/// Reserved spreadsheet column holding the flat key
pub const KEY_COLUMN: &str = "key";

/// Largest magnitude an integer can have and still survive a trip through an f64 cell
pub const MAX_EXACT_INT: u64 = 1 << 53;

//==============================================================================
// Leaf values
//==============================================================================

/// A terminal value in a locale tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Leaf {
    Text(String),
    Number(Number),
    Bool(bool),
}

impl Leaf {
    /// Empty text marks an untranslated entry
    pub fn empty() -> Self {
        Leaf::Text(String::new())
    }

    /// True only for `Text("")`
    pub fn is_empty(&self) -> bool {
        matches!(self, Leaf::Text(s) if s.is_empty())
    }

    /// Build a number leaf from a spreadsheet float. Whole values become integers so
    /// `3.0` round-trips as `3`; non-finite values fall back to their text form.
    pub fn from_f64(value: f64) -> Self {
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            return Leaf::Number(Number::from(value as i64));
        }
        match Number::from_f64(value) {
            Some(n) => Leaf::Number(n),
            None => Leaf::Text(value.to_string()),
        }
    }

    /// Integer text too wide for an f64 cell, as written by the spreadsheet exporter.
    /// Anything else (including short digit strings) stays text.
    pub fn from_wide_integer_text(text: &str) -> Option<Self> {
        let number = if let Ok(i) = text.parse::<i64>() {
            Number::from(i)
        } else {
            Number::from(text.parse::<u64>().ok()?)
        };
        (!fits_in_f64(&number)).then_some(Leaf::Number(number))
    }

    pub fn to_json(&self) -> Value {
        match self {
            Leaf::Text(s) => Value::String(s.clone()),
            Leaf::Number(n) => Value::Number(n.clone()),
            Leaf::Bool(b) => Value::Bool(*b),
        }
    }
}

/// True when a spreadsheet number cell can hold `n` without losing digits
pub fn fits_in_f64(n: &Number) -> bool {
    if let Some(i) = n.as_i64() {
        i.unsigned_abs() <= MAX_EXACT_INT
    } else if let Some(u) = n.as_u64() {
        u <= MAX_EXACT_INT
    } else {
        true
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Text(s) => f.write_str(s),
            Leaf::Number(n) => write!(f, "{}", n),
            Leaf::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Leaf {
    fn from(s: &str) -> Self {
        Leaf::Text(s.to_string())
    }
}

impl From<String> for Leaf {
    fn from(s: String) -> Self {
        Leaf::Text(s)
    }
}

//==============================================================================
// Locale trees
//==============================================================================

/// One entry of a locale tree. Whether a value nests is fixed when the node is built,
/// never guessed during traversal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LocaleNode {
    Leaf(Leaf),
    Node(LocaleTree),
}

impl LocaleNode {
    /// Convert a parsed JSON value. Arrays become nodes keyed by their decimal index,
    /// `null` becomes an empty (untranslated) leaf.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => LocaleNode::Node(LocaleTree::from_json_map(map)),
            Value::Array(items) => LocaleNode::Node(LocaleTree {
                entries: items
                    .into_iter()
                    .enumerate()
                    .map(|(idx, item)| (idx.to_string(), LocaleNode::from_json(item)))
                    .collect(),
            }),
            Value::String(s) => LocaleNode::Leaf(Leaf::Text(s)),
            Value::Number(n) => LocaleNode::Leaf(Leaf::Number(n)),
            Value::Bool(b) => LocaleNode::Leaf(Leaf::Bool(b)),
            Value::Null => LocaleNode::Leaf(Leaf::empty()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            LocaleNode::Leaf(leaf) => leaf.to_json(),
            LocaleNode::Node(tree) => tree.to_json(),
        }
    }
}

/// Nested translations for a single language. Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LocaleTree {
    pub entries: IndexMap<String, LocaleNode>,
}

impl LocaleTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_map(map: Map<String, Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(k, v)| (k, LocaleNode::from_json(v)))
                .collect(),
        }
    }

    /// Parse a JSON document whose root must be an object
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::from_json_map(map)),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        Value::Object(map)
    }

    pub fn get(&self, segment: &str) -> Option<&LocaleNode> {
        self.entries.get(segment)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of leaves reachable from this tree
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                LocaleNode::Leaf(_) => 1,
                LocaleNode::Node(tree) => tree.leaf_count(),
            })
            .sum()
    }
}

//==============================================================================
// Spreadsheet rows
//==============================================================================

/// Header row plus data rows of the first worksheet, as read from disk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    /// Language columns in header order (the `key` column is excluded)
    pub languages: Vec<LangId>,
    pub rows: Vec<SheetRow>,
}

/// One spreadsheet row: a flat key and one value per language column
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub key: String,
    pub values: IndexMap<LangId, Leaf>,
}

impl SheetRow {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: IndexMap::new(),
        }
    }

    pub fn with_value(mut self, lang: impl Into<LangId>, value: impl Into<Leaf>) -> Self {
        self.values.insert(lang.into(), value.into());
        self
    }

    /// Value for a language column, empty when the column is missing
    pub fn value(&self, lang: &str) -> Leaf {
        self.values.get(lang).cloned().unwrap_or_else(Leaf::empty)
    }

    /// True when at least one language column is untranslated
    pub fn has_untranslated(&self) -> bool {
        self.values.values().any(Leaf::is_empty)
    }
}
