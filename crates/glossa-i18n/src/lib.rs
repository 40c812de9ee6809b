//! Internationalization core for Glossa.
//!
//! Translations live in a [`Translations`] store per locale, keyed by flat
//! dotted keys (`menu.file.open`, `file.one`, `open@menu`). Catalogs come
//! from gettext PO files or JSON, plural categories are picked by built-in
//! per-language rules, and [`negotiate`] matches user preferences against
//! the locales on disk.
//!
//! ```
//! use glossa_i18n::{Locale, Translations, Translator};
//! use std::sync::Arc;
//!
//! let store = Translations::from_entries(&glossa_i18n::parse_po(
//!     "msgid \"file\"\nmsgid_plural \"files\"\nmsgstr[0] \"{count} file\"\nmsgstr[1] \"{count} files\"\n",
//! ).unwrap());
//! let translator = Translator::new(Locale::parse("en").unwrap(), Arc::new(store));
//!
//! assert_eq!(translator.translate_plural("file", 3), "3 files");
//! ```

pub mod json;
pub mod loader;
pub mod locale;
pub mod negotiate;
pub mod normalize;
pub mod plural;
pub mod po;
pub mod translations;
pub mod translator;
pub mod trie;

use std::path::PathBuf;
use tracing::debug;

pub use json::{flatten_json, to_flat_json, to_nested_json, JsonError};
pub use loader::{
    discover_locales, load_all, load_catalog, load_file, CatalogCache, CatalogFormat, LoaderConfig,
    LoaderStats,
};
pub use locale::{exact_match, match_language, match_quality, Locale, LocaleError};
pub use negotiate::{
    detect_locale, detect_locale_with_override, locale_fallback_chain, negotiate, negotiate_header,
    parse_accept_language, NegotiationError,
};
pub use normalize::{entries_to_translations, FlatKey, PluralSuffix};
pub use plural::{categories_for, plural_key, plural_rule_for, plural_rule_for_locale, PluralCategory, PluralRule};
pub use po::{parse_po, parse_po_file, ParseError, PoEntry, PoFile, PoHeader, PoWriter, WriteError};
pub use translations::Translations;
pub use translator::{interpolate, Translator};
pub use trie::Trie;

/// i18n errors.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error(transparent)]
    Negotiation(#[from] NegotiationError),

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("failed to read JSON catalog {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: JsonError,
    },

    #[error("failed to write PO catalog {}: {source}", path.display())]
    PoWrite {
        path: PathBuf,
        #[source]
        source: WriteError,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Entry point tying catalogs on disk to translators.
#[derive(Debug)]
pub struct I18n {
    cache: CatalogCache,
    default_locale: Locale,
    fallback_locale: Option<Locale>,
    supported: Vec<Locale>,
}

impl I18n {
    /// Serve catalogs described by `config`.
    ///
    /// `default_locale` is chosen when negotiation finds nothing, and backs
    /// lookups unless a fallback locale is set.
    pub fn new(config: LoaderConfig, default_locale: Locale) -> Self {
        Self {
            cache: CatalogCache::new(config),
            default_locale,
            fallback_locale: None,
            supported: Vec::new(),
        }
    }

    /// Back lookups with `locale` instead of the default locale.
    pub fn with_fallback_locale(mut self, locale: Locale) -> Self {
        self.fallback_locale = Some(locale);
        self
    }

    /// Negotiate only against `locales` instead of scanning the catalog directory.
    pub fn with_supported(mut self, locales: Vec<Locale>) -> Self {
        self.supported = locales;
        self
    }

    /// Reload catalogs whose files change on disk.
    pub fn with_hot_reload(mut self, enabled: bool) -> Self {
        self.cache = CatalogCache::new(self.cache.config().clone()).with_hot_reload(enabled);
        self
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// The locale backing lookups that miss.
    pub fn fallback_locale(&self) -> &Locale {
        self.fallback_locale.as_ref().unwrap_or(&self.default_locale)
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    /// Locales to negotiate against: the supported list, or every catalog directory.
    pub fn available(&self) -> Result<Vec<Locale>, I18nError> {
        if !self.supported.is_empty() {
            return Ok(self.supported.clone());
        }
        discover_locales(self.cache.config())
    }

    /// Best available locale for `preferred`.
    pub fn negotiate(&self, preferred: &[Locale]) -> Result<Locale, I18nError> {
        Ok(negotiate(&self.available()?, preferred)?)
    }

    /// Translator for the best match of `preferred`.
    ///
    /// Without preferences or without a match the default locale is used.
    /// The fallback locale's catalog backs the chosen one when they differ.
    pub fn translator_for(&self, preferred: &[Locale]) -> Result<Translator, I18nError> {
        if preferred.is_empty() {
            return self.translator(&self.default_locale);
        }

        let locale = match self.negotiate(preferred) {
            Ok(locale) => locale,
            Err(I18nError::Negotiation(NegotiationError::NoMatch)) => {
                debug!(default = %self.default_locale, "no preferred locale available, using default");
                self.default_locale.clone()
            }
            Err(e) => return Err(e),
        };

        self.translator(&locale)
    }

    /// Translator for an `Accept-Language` header value.
    pub fn translator_for_header(&self, header: &str) -> Result<Translator, I18nError> {
        self.translator_for(&parse_accept_language(header))
    }

    /// Translator for exactly `locale`, backed by the fallback locale.
    pub fn translator(&self, locale: &Locale) -> Result<Translator, I18nError> {
        let translator = Translator::new(locale.clone(), self.cache.get(locale)?);
        let fallback = self.fallback_locale();
        if locale == fallback {
            return Ok(translator);
        }

        Ok(translator.with_fallback(fallback.clone(), self.cache.get(fallback)?))
    }
}
