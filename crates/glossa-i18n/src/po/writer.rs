//! PO serialization.

use super::parser::escape;
use crate::locale::Locale;
use crate::normalize::FlatKey;
use crate::translations::Translations;
use std::collections::BTreeMap;

/// PO serialization errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    /// `msgid ""` is the header slot, so such a key would not read back.
    #[error("key {key:?} has an empty msgid and cannot be written as PO")]
    EmptyMsgid { key: String },
}

/// Writes flat translations as PO text.
///
/// A key carrying `@context` becomes `msgctxt` plus a `msgid` without the
/// context; any other key is the `msgid` as-is. Keys whose `msgid` would
/// be empty (`""`, `"@menu"`) are rejected.
#[derive(Debug, Clone, Default)]
pub struct PoWriter {
    language: Option<Locale>,
}

impl PoWriter {
    /// Create a writer without a header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a header declaring `language`.
    pub fn with_language(mut self, language: Locale) -> Self {
        self.language = Some(language);
        self
    }

    /// Serialize a translation store.
    pub fn write(&self, translations: &Translations) -> Result<String, WriteError> {
        self.write_map(&translations.to_map())
    }

    /// Serialize a key/value map, entries in key order.
    pub fn write_map(&self, translations: &BTreeMap<String, String>) -> Result<String, WriteError> {
        let mut out = String::new();

        if let Some(language) = &self.language {
            out.push_str("msgid \"\"\nmsgstr \"\"\n");
            out.push_str("\"Content-Type: text/plain; charset=UTF-8\\n\"\n");
            out.push_str(&format!("\"Language: {}\\n\"\n", escape(&language.to_string())));
        }

        for (key, value) in translations {
            if !out.is_empty() {
                out.push('\n');
            }

            let flat = FlatKey::parse(key);
            let msgid = match &flat.context {
                Some(_) => flat.without_context(),
                None => key.clone(),
            };
            if msgid.is_empty() {
                return Err(WriteError::EmptyMsgid { key: key.clone() });
            }

            if let Some(context) = &flat.context {
                out.push_str(&format!("msgctxt \"{}\"\n", escape(context)));
            }
            out.push_str(&format!("msgid \"{}\"\n", escape(&msgid)));
            out.push_str(&format!("msgstr \"{}\"\n", escape(value)));
        }

        Ok(out)
    }
}
