//! Locale codes of the form `ll` or `ll-RR`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Locale parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    #[error("invalid language code: {0:?}")]
    InvalidLanguage(String),

    #[error("invalid locale: {0:?}")]
    InvalidLocale(String),
}

/// A language with an optional region, stored normalized
/// (lowercase language, uppercase region).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Parse a locale code (e.g., "en", "en-US", " PT-br ").
    pub fn parse(code: &str) -> Result<Self, LocaleError> {
        let normalized = code.trim().to_lowercase();
        let parts: Vec<&str> = normalized.split('-').collect();

        match parts.as_slice() {
            [language] => {
                if !is_segment(language) {
                    return Err(LocaleError::InvalidLanguage(code.to_string()));
                }
                Ok(Self {
                    language: language.to_string(),
                    region: None,
                })
            }
            [language, region] => {
                if !is_segment(language) || !is_segment(region) {
                    return Err(LocaleError::InvalidLanguage(code.to_string()));
                }
                Ok(Self {
                    language: language.to_string(),
                    region: Some(region.to_uppercase()),
                })
            }
            _ => Err(LocaleError::InvalidLocale(code.to_string())),
        }
    }

    /// The two-letter language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The two-letter region code, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// This locale without its region.
    pub fn language_only(&self) -> Locale {
        Self {
            language: self.language.clone(),
            region: None,
        }
    }

    /// Whether both locales share a language.
    pub fn matches_language(&self, other: &Locale) -> bool {
        match_language(self, other)
    }
}

fn is_segment(s: &str) -> bool {
    s.chars().count() == 2 && s.chars().all(|c| c.is_ascii_alphabetic())
}

/// Language-equal: the languages match, regions are ignored.
pub fn match_language(a: &Locale, b: &Locale) -> bool {
    a.language == b.language
}

/// Exact-equal: language and region both match.
pub fn exact_match(a: &Locale, b: &Locale) -> bool {
    a == b
}

/// Similarity score between two locales.
///
/// Exact matches score `1.0`, language-only matches `0.8`, anything else `0.0`.
/// [`negotiate`](crate::negotiate::negotiate) ranks by preference order and
/// does not consult this score.
pub fn match_quality(a: &Locale, b: &Locale) -> f32 {
    if exact_match(a, b) {
        1.0
    } else if match_language(a, b) {
        0.8
    } else {
        0.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Locale::parse(&code).map_err(serde::de::Error::custom)
    }
}
