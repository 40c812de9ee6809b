//! Locale negotiation and detection.

use crate::locale::{exact_match, match_language, Locale};
use std::env;
use tracing::trace;

/// Negotiation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NegotiationError {
    #[error("no available locale matches the preferred locales")]
    NoMatch,
}

/// Pick the best available locale for an ordered preference list.
///
/// Each preference is tried in order against `available`: exact match first,
/// then same language, then the preference with its region stripped. The first
/// preference that yields any match wins, regardless of how good a later
/// preference's match would be. With no preferences at all, the first
/// available locale is returned.
pub fn negotiate(available: &[Locale], preferred: &[Locale]) -> Result<Locale, NegotiationError> {
    let Some(first) = available.first() else {
        return Err(NegotiationError::NoMatch);
    };

    if preferred.is_empty() {
        return Ok(first.clone());
    }

    for wanted in preferred {
        if let Some(found) = match_one(available, wanted) {
            return Ok(found.clone());
        }
    }

    Err(NegotiationError::NoMatch)
}

fn match_one<'a>(available: &'a [Locale], wanted: &Locale) -> Option<&'a Locale> {
    if let Some(found) = available.iter().find(|a| exact_match(a, wanted)) {
        trace!(%wanted, %found, strategy = "exact", "negotiated locale");
        return Some(found);
    }

    if let Some(found) = available.iter().find(|a| match_language(a, wanted)) {
        trace!(%wanted, %found, strategy = "language", "negotiated locale");
        return Some(found);
    }

    let stripped = wanted.language_only();
    let found = available.iter().find(|a| exact_match(a, &stripped))?;
    trace!(%wanted, %found, strategy = "region-stripped", "negotiated locale");
    Some(found)
}

/// Parse an HTTP `Accept-Language` header into preference order.
///
/// Quality values are accepted but ignored: order of appearance is the
/// preference order. Tags that are not `ll` or `ll-RR` (e.g. `*`,
/// `zh-Hant-TW`) are dropped.
pub fn parse_accept_language(header: &str) -> Vec<Locale> {
    header
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .filter_map(|piece| {
            let tag = piece.split(';').next().unwrap_or(piece).trim();
            match Locale::parse(tag) {
                Ok(locale) => Some(locale),
                Err(e) => {
                    trace!(tag, error = %e, "skipping accept-language tag");
                    None
                }
            }
        })
        .collect()
}

/// Negotiate directly against an `Accept-Language` header.
pub fn negotiate_header(available: &[Locale], header: &str) -> Result<Locale, NegotiationError> {
    negotiate(available, &parse_accept_language(header))
}

/// Detect the system locale with optional user override.
pub fn detect_locale_with_override(user_locale: Option<&str>) -> Option<Locale> {
    // User preference has highest priority
    if let Some(locale) = user_locale.and_then(normalize_posix) {
        return Some(locale);
    }

    detect_locale()
}

/// Detect the system locale.
///
/// Priority: `GLOSSA_LOCALE` > `LC_ALL` > `LC_MESSAGES` > `LANG`.
pub fn detect_locale() -> Option<Locale> {
    ["GLOSSA_LOCALE", "LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .find_map(from_env)
}

fn from_env(var: &str) -> Option<Locale> {
    env::var(var).ok().and_then(|v| normalize_posix(&v))
}

/// Convert POSIX locale names (`en_US.UTF-8`, `de_DE@euro`) into a [`Locale`].
///
/// `C` and `POSIX` carry no language and yield `None`.
pub fn normalize_posix(value: &str) -> Option<Locale> {
    let base = value
        .trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('_', "-");

    if base.is_empty() || base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
        return None;
    }

    Locale::parse(&base).ok()
}

/// Fallback chain for translations: the locale, its bare language, then the default.
pub fn locale_fallback_chain(locale: &Locale, default: &Locale) -> Vec<Locale> {
    let mut chain = vec![locale.clone()];

    if locale.region().is_some() {
        chain.push(locale.language_only());
    }

    if !chain.contains(default) {
        chain.push(default.clone());
    }

    chain
}
