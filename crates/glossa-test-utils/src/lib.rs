//! Test utilities for Glossa crates.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// English sample catalog: plain, context, plural and multi-line entries.
pub const SAMPLE_PO_EN: &str = r#"msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"
"Language: en\n"
"Plural-Forms: nplurals=2; plural=(n != 1);\n"

#. Shown on startup
msgid "app.name"
msgstr "Glossa"

msgid "greeting"
msgstr "Hello, {name}!"

msgctxt "menu"
msgid "open"
msgstr "Open…"

msgid "open"
msgstr "Open"

msgid "file"
msgid_plural "files"
msgstr[0] "{count} file"
msgstr[1] "{count} files"

msgid "welcome"
msgstr ""
"Welcome to Glossa.\n"
"Enjoy your stay."
"#;

/// Spanish sample catalog; leaves `welcome` untranslated.
pub const SAMPLE_PO_ES: &str = r#"msgid ""
msgstr ""
"Language: es\n"

msgid "app.name"
msgstr "Glossa"

msgid "greeting"
msgstr "¡Hola, {name}!"

msgctxt "menu"
msgid "open"
msgstr "Abrir…"

msgid "open"
msgstr "Abrir"

msgid "file"
msgid_plural "files"
msgstr[0] "{count} archivo"
msgstr[1] "{count} archivos"
"#;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Creates a temporary file with given content.
pub fn temp_file(content: &str) -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = dir.path().join("test_file");
    fs::write(&path, content).expect("Failed to write temp file");
    (dir, path)
}

/// A throwaway `<root>/<locale>/<domain>.<ext>` catalog tree.
pub struct LocaleTree {
    dir: TempDir,
}

impl LocaleTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self { dir: temp_dir() }
    }

    /// Tree holding [`SAMPLE_PO_EN`] and [`SAMPLE_PO_ES`] as `messages.po`.
    pub fn sample() -> Self {
        Self::new()
            .with_catalog("en", "messages.po", SAMPLE_PO_EN)
            .with_catalog("es", "messages.po", SAMPLE_PO_ES)
    }

    /// Root directory of the tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `<root>/<locale>/<file_name>`, creating the locale directory.
    pub fn write_catalog(&self, locale: &str, file_name: &str, content: &str) -> PathBuf {
        let locale_dir = self.dir.path().join(locale);
        fs::create_dir_all(&locale_dir).expect("Failed to create locale dir");
        let path = locale_dir.join(file_name);
        fs::write(&path, content).expect("Failed to write catalog");
        path
    }

    /// Consuming [`write_catalog`](Self::write_catalog).
    pub fn with_catalog(self, locale: &str, file_name: &str, content: &str) -> Self {
        self.write_catalog(locale, file_name, content);
        self
    }
}

impl Default for LocaleTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err and return the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_temp_file_creation() {
        let (_dir, path) = temp_file("test content");
        assert!(path.is_file());
        assert_eq!(fs::read_to_string(&path).unwrap(), "test content");
    }

    #[test]
    fn test_locale_tree_layout() {
        let tree = LocaleTree::sample().with_catalog("fr", "messages.json", "{}");

        assert!(tree.path().join("en/messages.po").is_file());
        assert!(tree.path().join("es/messages.po").is_file());
        assert!(tree.path().join("fr/messages.json").is_file());
    }

    #[test]
    fn test_assert_macros() {
        let ok: Result<u8, String> = Ok(3);
        assert_eq!(assert_ok!(ok), 3);

        let err: Result<u8, String> = Err("boom".into());
        assert_eq!(assert_err!(err), "boom");
    }

    proptest! {
        #[test]
        fn test_catalog_content_roundtrip(content in "\\PC*") {
            let tree = LocaleTree::new();
            let path = tree.write_catalog("en", "messages.po", &content);
            prop_assert_eq!(fs::read_to_string(path).unwrap(), content);
        }
    }
}
