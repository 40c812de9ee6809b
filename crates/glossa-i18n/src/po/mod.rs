//! Gettext PO support.

mod parser;
mod writer;

pub use parser::{escape, parse_po, parse_po_file, ParseError};
pub use writer::{PoWriter, WriteError};

/// One translation unit from a PO file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoEntry {
    pub msgid: String,
    /// The translation; for plural entries this is the first plural form.
    pub msgstr: String,
    pub msgid_plural: Option<String>,
    /// Plural forms ordered by `msgstr[n]` index, starting at 0.
    pub msgstr_plural: Vec<String>,
    pub msgctxt: Option<String>,
    /// Translator comments (`#` and `#.` lines).
    pub comments: Vec<String>,
    /// Source references (`#:` lines).
    pub references: Vec<String>,
    /// Flags such as `fuzzy` (`#,` lines).
    pub flags: Vec<String>,
}

impl PoEntry {
    /// Simple `msgid`/`msgstr` pair.
    pub fn new(msgid: impl Into<String>, msgstr: impl Into<String>) -> Self {
        Self {
            msgid: msgid.into(),
            msgstr: msgstr.into(),
            ..Self::default()
        }
    }

    /// Attach a `msgctxt`.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.msgctxt = Some(context.into());
        self
    }

    /// Turn into a plural entry. `forms` must not be empty.
    pub fn with_plural(mut self, msgid_plural: impl Into<String>, forms: Vec<String>) -> Self {
        if let Some(first) = forms.first() {
            self.msgstr = first.clone();
        }
        self.msgid_plural = Some(msgid_plural.into());
        self.msgstr_plural = forms;
        self
    }

    /// Whether this entry has plural forms.
    pub fn is_plural(&self) -> bool {
        self.msgid_plural.is_some()
    }

    /// Whether the entry is marked `fuzzy`.
    pub fn is_fuzzy(&self) -> bool {
        self.flags.iter().any(|f| f == "fuzzy")
    }
}

/// Header metadata carried by the `msgid ""` entry.
///
/// Fields are kept in file order. `Plural-Forms` is exposed verbatim and
/// never evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoHeader {
    fields: Vec<(String, String)>,
}

impl PoHeader {
    /// Parse the `Key: Value` lines of a header `msgstr`.
    pub fn parse(msgstr: &str) -> Self {
        let fields = msgstr
            .lines()
            .filter_map(|line| {
                let (key, value) = line.split_once(':')?;
                Some((key.trim().to_string(), value.trim().to_string()))
            })
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { fields }
    }

    /// Look up a header field, ignoring ASCII case.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The `Language` field.
    pub fn language(&self) -> Option<&str> {
        self.get("Language")
    }

    /// The raw `Plural-Forms` field.
    pub fn plural_forms(&self) -> Option<&str> {
        self.get("Plural-Forms")
    }

    /// All fields in file order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

/// A parsed PO file: optional header plus entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoFile {
    pub header: Option<PoHeader>,
    pub entries: Vec<PoEntry>,
}
