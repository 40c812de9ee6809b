//! Per-language plural rules.
//!
//! Each rule maps an integer count to a CLDR [`PluralCategory`]. Twelve
//! languages have dedicated tables; every other language code silently uses
//! the English rule.

use crate::locale::Locale;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// CLDR plural categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// Every category, in CLDR order.
    pub const ALL: [PluralCategory; 6] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Few,
        Self::Many,
        Self::Other,
    ];

    /// The key suffix for this category (without the leading dot).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }

    /// Parse a key suffix back into a category.
    pub fn from_suffix(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plural rule: count to category.
pub type PluralRule = fn(i64) -> PluralCategory;

/// English, Spanish, German, Italian.
pub fn english_plural_rule(n: i64) -> PluralCategory {
    if n == 1 {
        PluralCategory::One
    } else {
        PluralCategory::Other
    }
}

pub fn spanish_plural_rule(n: i64) -> PluralCategory {
    english_plural_rule(n)
}

pub fn german_plural_rule(n: i64) -> PluralCategory {
    english_plural_rule(n)
}

pub fn italian_plural_rule(n: i64) -> PluralCategory {
    english_plural_rule(n)
}

pub fn portuguese_plural_rule(n: i64) -> PluralCategory {
    match n {
        0 => PluralCategory::Zero,
        1 => PluralCategory::One,
        _ => PluralCategory::Other,
    }
}

/// French and Hindi treat zero as singular.
pub fn french_plural_rule(n: i64) -> PluralCategory {
    match n {
        0 | 1 => PluralCategory::One,
        _ => PluralCategory::Other,
    }
}

pub fn hindi_plural_rule(n: i64) -> PluralCategory {
    french_plural_rule(n)
}

/// Slavic rule: one for 1, 21, 31...; few for 2-4, 22-24...; many otherwise.
pub fn russian_plural_rule(n: i64) -> PluralCategory {
    let n = n.unsigned_abs();
    let mod10 = n % 10;
    let mod100 = n % 100;

    if mod10 == 1 && mod100 != 11 {
        PluralCategory::One
    } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
        PluralCategory::Few
    } else {
        PluralCategory::Many
    }
}

pub fn arabic_plural_rule(n: i64) -> PluralCategory {
    match n {
        0 => PluralCategory::Zero,
        1 => PluralCategory::One,
        2 => PluralCategory::Two,
        3..=10 => PluralCategory::Few,
        11..=99 => PluralCategory::Many,
        _ => PluralCategory::Other,
    }
}

/// Chinese, Japanese and Korean have no grammatical plural.
pub fn chinese_plural_rule(_n: i64) -> PluralCategory {
    PluralCategory::Other
}

pub fn japanese_plural_rule(n: i64) -> PluralCategory {
    chinese_plural_rule(n)
}

pub fn korean_plural_rule(n: i64) -> PluralCategory {
    chinese_plural_rule(n)
}

/// Look up the rule for a language code. Unknown codes get the English rule.
pub fn plural_rule_for(language: &str) -> PluralRule {
    match language.to_ascii_lowercase().as_str() {
        "en" => english_plural_rule,
        "es" => spanish_plural_rule,
        "pt" => portuguese_plural_rule,
        "fr" => french_plural_rule,
        "de" => german_plural_rule,
        "it" => italian_plural_rule,
        "ru" => russian_plural_rule,
        "ar" => arabic_plural_rule,
        "zh" => chinese_plural_rule,
        "ja" => japanese_plural_rule,
        "ko" => korean_plural_rule,
        "hi" => hindi_plural_rule,
        _ => english_plural_rule,
    }
}

/// Rule for a locale's language; the region plays no part.
pub fn plural_rule_for_locale(locale: &Locale) -> PluralRule {
    plural_rule_for(locale.language())
}

/// Append the category suffix for `count` to `base` (e.g. `"item"` → `"item.one"`).
pub fn plural_key(base: &str, count: i64, rule: PluralRule) -> String {
    format!("{}.{}", base, rule(count))
}

/// Every category `rule` produces for counts in `0..=200`.
///
/// All twelve rules cycle well within that range.
pub fn categories_for(rule: PluralRule) -> BTreeSet<PluralCategory> {
    (0..=200i64).map(rule).collect()
}
