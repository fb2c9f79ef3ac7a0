//! Alias tables: shortcode → emoji and ASCII emoticon → canonical shortcode.
//!
//! Two read-only tables drive the text rewriting passes:
//!
//! - [`AliasTable`] maps a shortcode name (`smile`, without colons) to the
//!   emoji it stands for. Names are unique and case-sensitive.
//! - [`AsciiAliasTable`] maps a canonical shortcode to the ASCII emoticons
//!   that should be read as that shortcode (`smiley` ← `:)`, `:-)`).
//!
//! Both tables are built once and then shared by reference. They are a
//! swappable data dependency: the built-in tables cover the GitHub (gemoji)
//! shortcodes and a common emoticon set, and either table can be replaced by
//! one loaded from JSON.
//!
//! # JSON Format
//!
//! Shortcode aliases are a flat object:
//!
//! ```text
//! { "smile": "😄", "heart": "❤️" }
//! ```
//!
//! Emoticon aliases map each canonical shortcode to its variants:
//!
//! ```text
//! { "smiley": [":)", ":-)"], "wink": [";)", ";-)"] }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors that can occur when loading alias tables.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Invalid alias JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Emoticon entry has no variants: {0}")]
    EmptyEntry(String),
}

/// Emoticons bundled with the crate, in ownership order.
///
/// A variant listed twice belongs to the first shortcode that lists it. No
/// variant may read as a built-in shortcode once its colons are stripped
/// (`:o` would be `o`, the hollow red circle), since the converter never
/// rewrites such a variant.
const BUILTIN_ASCII_ALIASES: &[(&str, &[&str])] = &[
    ("angry", &[">:(", ">:-("]),
    ("blush", &[":\")", ":-\")"]),
    ("broken_heart", &["</3", "<\\3"]),
    ("confused", &[":/", ":-/", ":\\", ":-\\"]),
    ("cry", &[":'(", ":'-(", ":,(", ":,-("]),
    ("frowning", &[":(", ":-("]),
    ("heart", &["<3"]),
    ("imp", &["]:(", "]:-("]),
    ("innocent", &["o:)", "O:)", "o:-)", "O:-)", "0:)", "0:-)"]),
    (
        "joy",
        &[":')", ":'-)", ":,)", ":,-)", ":'D", ":'-D", ":,D", ":,-D"],
    ),
    ("kissing", &[":*", ":-*"]),
    ("laughing", &["x-)", "X-)"]),
    ("neutral_face", &[":|", ":-|"]),
    ("open_mouth", &[":-o", ":O", ":-O"]),
    ("rage", &[":@", ":-@"]),
    ("smile", &[":D", ":-D"]),
    ("smiley", &[":)", ":-)"]),
    ("smiling_imp", &["]:)", "]:-)"]),
    ("sob", &[":,'(", ":,'-(", ";(", ";-("]),
    ("stuck_out_tongue", &[":P", ":-P", ":p", ":-p"]),
    ("sunglasses", &["8-)", "B-)"]),
    ("sweat", &[",:(", ",:-("]),
    ("sweat_smile", &[",:)", ",:-)"]),
    ("unamused", &[":s", ":-S", ":z", ":-Z", ":$", ":-$"]),
    ("wink", &[";)", ";-)"]),
];

/// Immutable shortcode → emoji map.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: FxHashMap<String, String>,
}

impl AliasTable {
    /// Create a table from an existing map.
    pub fn new(aliases: FxHashMap<String, String>) -> Self {
        Self { aliases }
    }

    /// The GitHub (gemoji) shortcodes known to the `emojis` database.
    pub fn builtin() -> Self {
        let table: Self = emojis::iter()
            .flat_map(|emoji| {
                emoji
                    .shortcodes()
                    .map(move |code| (code.to_string(), emoji.as_str().to_string()))
            })
            .collect();
        log::debug!("built-in alias table: {} shortcodes", table.len());
        table
    }

    /// Load a table from a JSON object of `shortcode: emoji` pairs.
    pub fn from_json(data: &[u8]) -> Result<Self, TableError> {
        let aliases: FxHashMap<String, String> = serde_json::from_slice(data)?;
        Ok(Self::new(aliases))
    }

    /// Load a table from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }

    /// Look up the emoji for a shortcode name (without colons).
    #[inline]
    pub fn get(&self, shortcode: &str) -> Option<&str> {
        self.aliases.get(shortcode).map(String::as_str)
    }

    #[inline]
    pub fn contains(&self, shortcode: &str) -> bool {
        self.aliases.contains_key(shortcode)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Iterate over `(shortcode, emoji)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Immutable canonical shortcode → ASCII emoticon variants map.
///
/// Lookups go the other way, from a matched variant to the shortcode that
/// owns it, so the table keeps a reverse index alongside the entries.
#[derive(Debug, Clone, Default)]
pub struct AsciiAliasTable {
    entries: Vec<(String, Vec<String>)>,
    owners: FxHashMap<String, usize>,
}

impl AsciiAliasTable {
    /// Build a table from `(shortcode, variants)` entries.
    ///
    /// Entries are kept in the given order. Empty variant strings are
    /// skipped; a variant claimed by more than one shortcode stays with the
    /// first one.
    pub fn new<I, S, V>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let mut table = Self::default();

        for (shortcode, variants) in entries {
            let shortcode = shortcode.into();
            let variants: Vec<String> = variants
                .into_iter()
                .map(Into::into)
                .filter(|v: &String| !v.is_empty())
                .collect();

            if variants.is_empty() {
                return Err(TableError::EmptyEntry(shortcode));
            }

            let index = table.entries.len();
            for variant in &variants {
                match table.owners.get(variant) {
                    Some(&owner) => log::warn!(
                        "emoticon {:?} is listed under both :{}: and :{}:, keeping :{}:",
                        variant,
                        table.entries[owner].0,
                        shortcode,
                        table.entries[owner].0
                    ),
                    None => {
                        table.owners.insert(variant.clone(), index);
                    }
                }
            }

            table.entries.push((shortcode, variants));
        }

        Ok(table)
    }

    /// The emoticon set bundled with the crate.
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for &(shortcode, variants) in BUILTIN_ASCII_ALIASES {
            let index = table.entries.len();
            for &variant in variants {
                table.owners.entry(variant.to_string()).or_insert(index);
            }
            table.entries.push((
                shortcode.to_string(),
                variants.iter().map(|v| v.to_string()).collect(),
            ));
        }
        log::debug!(
            "built-in emoticon table: {} shortcodes, {} variants",
            table.entries.len(),
            table.owners.len()
        );
        table
    }

    /// Load a table from a JSON object of `shortcode: [variants]` pairs.
    ///
    /// JSON objects carry no order, so ownership of a shared variant goes to
    /// the alphabetically first shortcode.
    pub fn from_json(data: &[u8]) -> Result<Self, TableError> {
        let entries: BTreeMap<String, Vec<String>> = serde_json::from_slice(data)?;
        Self::new(entries)
    }

    /// Load a table from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }

    /// The canonical shortcode that owns an emoticon variant.
    #[inline]
    pub fn shortcode_for(&self, variant: &str) -> Option<&str> {
        self.owners
            .get(variant)
            .map(|&index| self.entries[index].0.as_str())
    }

    /// The variants listed under a canonical shortcode.
    pub fn variants(&self, shortcode: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == shortcode)
            .map(|(_, variants)| variants.as_slice())
    }

    /// Every distinct variant, each exactly once.
    pub fn all_variants(&self) -> impl Iterator<Item = &str> {
        self.owners.keys().map(String::as_str)
    }

    /// Number of canonical shortcodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
