//! Translation store for a single locale.

use crate::normalize::entries_to_translations;
use crate::po::PoEntry;
use crate::trie::Trie;
use std::collections::BTreeMap;

/// Dotted-key translation store backed by a [`Trie`].
///
/// `"menu.file.open"` is stored along the path `menu` → `file` → `open`.
/// Once built, a store is normally shared read-only (e.g. behind an `Arc`);
/// a changed catalog produces a new store.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    trie: Trie<String>,
}

/// Split a flat key into trie segments.
pub fn key_parts(key: &str) -> Vec<&str> {
    key.split('.').collect()
}

impl Translations {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from PO entries.
    pub fn from_entries(entries: &[PoEntry]) -> Self {
        entries_to_translations(entries).into_iter().collect()
    }

    /// Store a translation. Later inserts of the same key win.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> Option<String> {
        self.trie.insert(&key_parts(key), value.into())
    }

    /// Consuming insert.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a translation by its flat key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.trie.get(&key_parts(key)).map(String::as_str)
    }

    /// Whether a translation exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.trie.contains(&key_parts(key))
    }

    /// Number of translations.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Every flat key, in trie order.
    pub fn keys(&self) -> Vec<String> {
        self.trie.fold(Vec::with_capacity(self.len()), |mut acc, parts, _| {
            acc.push(parts.join("."));
            acc
        })
    }

    /// All translations under a namespace, keyed by full flat key.
    ///
    /// `namespace("menu")` contains `menu` itself (if set) and every
    /// `menu.*` key, but not `menubar`. Trailing dots are ignored, so
    /// `namespace("menu.")` is the same query.
    pub fn namespace(&self, prefix: &str) -> BTreeMap<String, String> {
        let prefix = prefix.trim_end_matches('.');
        let parts: Vec<&str> = if prefix.is_empty() {
            Vec::new()
        } else {
            key_parts(prefix)
        };

        self.trie.fold_prefix(&parts, BTreeMap::new(), |mut acc, key, value| {
            acc.insert(key.join("."), value.clone());
            acc
        })
    }

    /// Flatten back into a key/value map.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.namespace("")
    }

    /// Fold over every `(key_parts, value)` pair.
    pub fn fold<'a, A, F>(&'a self, init: A, f: F) -> A
    where
        F: FnMut(A, &[String], &'a String) -> A,
    {
        self.trie.fold(init, f)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Translations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut translations = Self::new();
        for (key, value) in iter {
            translations.insert(key.as_ref(), value);
        }
        translations
    }
}
