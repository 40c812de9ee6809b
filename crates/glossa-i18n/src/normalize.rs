//! PO entries to flat translation keys, and back.
//!
//! Key shape: `segment(.segment)*[.suffix][@context]` where the optional
//! suffix is a plural category name or a form index of 2 or more. The
//! plural suffix always precedes the context (`file.one@dialog`).

use crate::plural::PluralCategory;
use crate::po::PoEntry;
use std::collections::BTreeMap;
use std::fmt;

/// Plural marker at the end of a flat key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralSuffix {
    Category(PluralCategory),
    /// A `msgstr[n]` form beyond the first two (`n >= 2`).
    Index(usize),
}

impl PluralSuffix {
    /// Suffix for a `msgstr[n]` index: 0 is `one`, 1 is `other`, the rest are numeric.
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => Self::Category(PluralCategory::One),
            1 => Self::Category(PluralCategory::Other),
            n => Self::Index(n),
        }
    }

    fn parse(segment: &str) -> Option<Self> {
        if let Some(category) = PluralCategory::from_suffix(segment) {
            return Some(Self::Category(category));
        }
        match segment.parse::<usize>() {
            Ok(n) if n >= 2 && !segment.starts_with('+') => Some(Self::Index(n)),
            _ => None,
        }
    }
}

impl fmt::Display for PluralSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(category) => write!(f, "{category}"),
            Self::Index(n) => write!(f, "{n}"),
        }
    }
}

/// A flat key split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatKey {
    pub base: String,
    pub plural: Option<PluralSuffix>,
    pub context: Option<String>,
}

impl FlatKey {
    /// Split a flat key. The context is whatever follows the last `@`.
    pub fn parse(key: &str) -> Self {
        let (body, context) = match key.rsplit_once('@') {
            Some((body, context)) => (body, Some(context.to_string())),
            None => (key, None),
        };

        let (base, plural) = match body.rsplit_once('.') {
            Some((base, last)) => match PluralSuffix::parse(last) {
                Some(suffix) => (base, Some(suffix)),
                None => (body, None),
            },
            None => (body, None),
        };

        Self {
            base: base.to_string(),
            plural,
            context,
        }
    }

    /// The key with its context removed (plural suffix kept).
    pub fn without_context(&self) -> String {
        match &self.plural {
            Some(suffix) => format!("{}.{}", self.base, suffix),
            None => self.base.clone(),
        }
    }
}

impl fmt::Display for FlatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.without_context())?;
        if let Some(context) = &self.context {
            write!(f, "@{context}")?;
        }
        Ok(())
    }
}

/// Flat `(key, value)` pairs for one entry.
///
/// Plain entries yield one pair; plural entries yield one pair per form.
pub fn entry_pairs(entry: &PoEntry) -> Vec<(String, String)> {
    let key = |plural: Option<PluralSuffix>| {
        FlatKey {
            base: entry.msgid.clone(),
            plural,
            context: entry.msgctxt.clone(),
        }
        .to_string()
    };

    if entry.is_plural() {
        entry
            .msgstr_plural
            .iter()
            .enumerate()
            .map(|(index, value)| (key(Some(PluralSuffix::for_index(index))), value.clone()))
            .collect()
    } else {
        vec![(key(None), entry.msgstr.clone())]
    }
}

/// Flatten entries into a key/value map. Later entries win on collisions.
pub fn entries_to_translations(entries: &[PoEntry]) -> BTreeMap<String, String> {
    entries.iter().flat_map(entry_pairs).collect()
}
