//! Lookups against a locale's translations with an optional fallback locale.

use crate::locale::Locale;
use crate::plural::{plural_key, plural_rule_for_locale, PluralCategory};
use crate::translations::Translations;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Translator bound to one locale.
///
/// Stores are shared through `Arc`, so a translator is cheap to clone and
/// keeps working on the catalog it was built with even if a cache swaps in
/// a newer one.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    translations: Arc<Translations>,
    fallback: Option<(Locale, Arc<Translations>)>,
}

impl Translator {
    /// Create a translator without a fallback.
    pub fn new(locale: Locale, translations: Arc<Translations>) -> Self {
        Self {
            locale,
            translations,
            fallback: None,
        }
    }

    /// Consult `translations` for `locale` when the primary store misses.
    pub fn with_fallback(mut self, locale: Locale, translations: Arc<Translations>) -> Self {
        self.fallback = Some((locale, translations));
        self
    }

    /// The primary locale.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The fallback locale, if any.
    pub fn fallback_locale(&self) -> Option<&Locale> {
        self.fallback.as_ref().map(|(locale, _)| locale)
    }

    /// Primary store, then fallback.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.translations.get(key).or_else(|| {
            self.fallback
                .as_ref()
                .and_then(|(_, translations)| translations.get(key))
        })
    }

    /// Translate `key`, or return the key itself when nothing matches.
    pub fn translate(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(value) => value.to_string(),
            None => {
                tracing::trace!(locale = %self.locale, key, "missing translation");
                key.to_string()
            }
        }
    }

    /// Translate and substitute `{name}` placeholders.
    pub fn translate_with<K, V>(&self, key: &str, args: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        interpolate(&self.translate(key), args)
    }

    /// Translate a count-dependent message and substitute `{count}`.
    ///
    /// Tries `key.<category>` under the primary locale's rule, then
    /// `key.other`, then the same two keys in the fallback store under the
    /// fallback locale's rule. Falls back to `key` itself.
    pub fn translate_plural(&self, key: &str, count: i64) -> String {
        let template = plural_lookup(&self.locale, &self.translations, key, count)
            .or_else(|| {
                self.fallback
                    .as_ref()
                    .and_then(|(locale, translations)| plural_lookup(locale, translations, key, count))
            })
            .unwrap_or(key);

        interpolate(template, &[("count", count.to_string())])
    }

    /// Look up `key@context`, then the bare `key`.
    pub fn translate_context(&self, key: &str, context: &str) -> String {
        let contextual = format!("{key}@{context}");
        self.lookup(&contextual)
            .or_else(|| self.lookup(key))
            .unwrap_or(key)
            .to_string()
    }

    /// Every translation under `prefix` (primary entries override fallback ones).
    pub fn namespace(&self, prefix: &str) -> BTreeMap<String, String> {
        let mut merged = self
            .fallback
            .as_ref()
            .map(|(_, translations)| translations.namespace(prefix))
            .unwrap_or_default();
        merged.extend(self.translations.namespace(prefix));
        merged
    }
}

fn plural_lookup<'a>(
    locale: &Locale,
    translations: &'a Translations,
    key: &str,
    count: i64,
) -> Option<&'a str> {
    let rule = plural_rule_for_locale(locale);
    translations
        .get(&plural_key(key, count, rule))
        .or_else(|| translations.get(&format!("{key}.{}", PluralCategory::Other)))
}

/// Replace each `{name}` in `template` with its value.
pub fn interpolate<K, V>(template: &str, args: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    args.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{}}}", name.as_ref()), value.as_ref())
    })
}

/// Translate through a [`Translator`].
///
/// ```
/// use glossa_i18n::{t, Locale, Translations, Translator};
/// use std::sync::Arc;
///
/// let store = Translations::new().with("greeting", "Hello, {name}!");
/// let translator = Translator::new(Locale::parse("en").unwrap(), Arc::new(store));
///
/// assert_eq!(t!(translator, "greeting", name = "Ada"), "Hello, Ada!");
/// assert_eq!(t!(translator, "missing"), "missing");
/// ```
#[macro_export]
macro_rules! t {
    ($translator:expr, $key:expr) => {
        $translator.translate($key)
    };
    ($translator:expr, $key:expr, $($name:ident = $value:expr),+ $(,)?) => {
        $translator.translate_with(
            $key,
            &[$((stringify!($name), $value.to_string())),+],
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(code: &str) -> Locale {
        Locale::parse(code).unwrap()
    }

    fn spanish() -> Translator {
        let es = Translations::new()
            .with("greeting", "Hola, {name}")
            .with("file.one", "{count} archivo")
            .with("file.other", "{count} archivos")
            .with("open", "Abrir")
            .with("open@menu", "Abrir…")
            .with("menu.file", "Archivo");

        let en = Translations::new()
            .with("greeting", "Hello, {name}")
            .with("farewell", "Goodbye")
            .with("day.one", "{count} day")
            .with("day.other", "{count} days")
            .with("menu.file", "File")
            .with("menu.edit", "Edit");

        Translator::new(locale("es"), Arc::new(es)).with_fallback(locale("en"), Arc::new(en))
    }

    #[test]
    fn test_lookup_prefers_primary() {
        let t = spanish();
        assert_eq!(t.lookup("greeting"), Some("Hola, {name}"));
        assert_eq!(t.lookup("farewell"), Some("Goodbye"));
        assert_eq!(t.lookup("nope"), None);
    }

    #[test]
    fn test_translate_returns_key_on_miss() {
        assert_eq!(spanish().translate("does.not.exist"), "does.not.exist");
    }

    #[test]
    fn test_translate_with() {
        assert_eq!(spanish().translate_with("greeting", &[("name", "Ana")]), "Hola, Ana");
    }

    #[test]
    fn test_translate_plural() {
        let t = spanish();
        assert_eq!(t.translate_plural("file", 1), "1 archivo");
        assert_eq!(t.translate_plural("file", 0), "0 archivos");
        assert_eq!(t.translate_plural("file", 5), "5 archivos");
        assert_eq!(t.translate_plural("day", 1), "1 day");
        assert_eq!(t.translate_plural("day", 3), "3 days");
        assert_eq!(t.translate_plural("unknown", 2), "unknown");
    }

    #[test]
    fn test_translate_plural_falls_back_to_other() {
        let ru = Translations::new()
            .with("apple.one", "{count} яблоко")
            .with("apple.other", "{count} яблока");
        let t = Translator::new(locale("ru"), Arc::new(ru));

        assert_eq!(t.translate_plural("apple", 21), "21 яблоко");
        // "many" is missing, so "other" is used.
        assert_eq!(t.translate_plural("apple", 5), "5 яблока");
    }

    #[test]
    fn test_translate_context() {
        let t = spanish();
        assert_eq!(t.translate_context("open", "menu"), "Abrir…");
        assert_eq!(t.translate_context("open", "toolbar"), "Abrir");
        assert_eq!(t.translate_context("close", "menu"), "close");
    }

    #[test]
    fn test_namespace_merges_fallback() {
        let ns = spanish().namespace("menu");
        assert_eq!(ns.get("menu.file").map(String::as_str), Some("Archivo"));
        assert_eq!(ns.get("menu.edit").map(String::as_str), Some("Edit"));
        assert_eq!(ns.len(), 2);
    }

    #[test]
    fn test_macro() {
        let t = spanish();
        assert_eq!(crate::t!(t, "open"), "Abrir");
        assert_eq!(crate::t!(t, "greeting", name = "Luis"), "Hola, Luis");
        assert_eq!(crate::t!(t, "{a}-{b}", a = 1, b = 2), "1-2");
    }

    #[test]
    fn test_interpolate_leaves_unknown_placeholders() {
        assert_eq!(interpolate("{x} and {y}", &[("x", "1")]), "1 and {y}");
    }
}
