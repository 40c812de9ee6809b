//! Check command implementation.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use clap::Parser;
use glossa_i18n::{
    categories_for, discover_locales, load_all, plural_rule_for_locale, FlatKey, LoaderConfig, Locale,
    PluralCategory, PluralSuffix, Translations,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Check every catalog against the default locale
///
/// Reports catalogs that fail to load, messages the default locale has and
/// another locale lacks, and plural messages missing a category the
/// locale's plural rule can select.
#[derive(Debug, Parser)]
pub struct CheckCommand {
    /// Catalog directory (defaults to the configured one)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

/// Findings for one locale.
#[derive(Debug, Serialize)]
pub struct LocaleReport {
    pub locale: Locale,
    pub keys: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Messages present in the reference locale only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
    /// Plural messages and the categories they lack.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub plural_gaps: BTreeMap<String, Vec<PluralCategory>>,
}

impl LocaleReport {
    pub fn problems(&self) -> usize {
        usize::from(self.error.is_some()) + self.missing.len() + self.plural_gaps.len()
    }
}

/// Result of checking a catalog directory.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub reference: Locale,
    pub locales: Vec<LocaleReport>,
}

impl CheckReport {
    pub fn problems(&self) -> usize {
        self.locales.iter().map(LocaleReport::problems).sum()
    }
}

impl FormattedOutput for CheckReport {
    fn format_text(&self) -> String {
        let mut lines = Vec::new();

        for report in &self.locales {
            let status = if report.problems() == 0 { "ok" } else { "FAIL" };
            lines.push(format!("{} ({} keys): {status}", report.locale, report.keys));

            if let Some(error) = &report.error {
                lines.push(format!("  error: {error}"));
            }
            for key in &report.missing {
                lines.push(format!("  missing: {key}"));
            }
            for (key, categories) in &report.plural_gaps {
                let categories: Vec<&str> = categories.iter().map(PluralCategory::as_str).collect();
                lines.push(format!("  plural {key}: missing {}", categories.join(", ")));
            }
        }

        lines.push(match self.problems() {
            0 => format!("All catalogs match {}.", self.reference),
            n => format!("{n} problem(s) against {}.", self.reference),
        });
        lines.join("\n")
    }
}

/// Message ids of a catalog: plural keys collapse to their base.
fn message_ids(translations: &Translations) -> BTreeSet<String> {
    translations
        .keys()
        .iter()
        .map(|key| {
            let flat = FlatKey::parse(key);
            FlatKey {
                plural: None,
                ..flat
            }
            .to_string()
        })
        .collect()
}

/// Plural messages lacking categories `locale` can select.
fn plural_gaps(locale: &Locale, translations: &Translations) -> BTreeMap<String, Vec<PluralCategory>> {
    let mut present: BTreeMap<String, BTreeSet<PluralCategory>> = BTreeMap::new();

    for key in translations.keys() {
        let flat = FlatKey::parse(&key);
        let Some(suffix) = flat.plural else { continue };
        let categories = present
            .entry(FlatKey { plural: None, ..flat }.to_string())
            .or_default();
        if let PluralSuffix::Category(category) = suffix {
            categories.insert(category);
        }
    }

    let required = categories_for(plural_rule_for_locale(locale));
    present
        .into_iter()
        .filter_map(|(id, found)| {
            let missing: Vec<PluralCategory> = required.difference(&found).copied().collect();
            (!missing.is_empty()).then_some((id, missing))
        })
        .collect()
}

/// Check every locale under `config` against `reference`.
pub fn check_catalogs(config: &LoaderConfig, reference: &Locale) -> Result<CheckReport, CliError> {
    let locales = discover_locales(config)?;
    let results = load_all(config, &locales);

    let reference_ids = match results.iter().find(|(locale, _)| locale == reference) {
        Some((_, Ok(translations))) => message_ids(translations),
        Some((_, Err(_))) => BTreeSet::new(),
        None => {
            warn!(%reference, "reference locale has no catalog directory");
            BTreeSet::new()
        }
    };

    let locales = results
        .into_iter()
        .map(|(locale, result)| match result {
            Ok(translations) => {
                let missing = if &locale == reference {
                    Vec::new()
                } else {
                    reference_ids
                        .difference(&message_ids(&translations))
                        .cloned()
                        .collect()
                };
                let report = LocaleReport {
                    keys: translations.len(),
                    missing,
                    plural_gaps: plural_gaps(&locale, &translations),
                    error: None,
                    locale,
                };
                debug!(locale = %report.locale, problems = report.problems(), "checked catalog");
                report
            }
            Err(e) => LocaleReport {
                locale,
                keys: 0,
                error: Some(e.to_string()),
                missing: Vec::new(),
                plural_gaps: BTreeMap::new(),
            },
        })
        .collect();

    Ok(CheckReport {
        reference: reference.clone(),
        locales,
    })
}

impl CheckCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mut config = ctx.loader_config();
        if let Some(dir) = &self.dir {
            config.locale_dir = dir.clone();
        }

        let report = check_catalogs(&config, &ctx.default_locale()?)?;
        print_output(ctx.format, &report)?;

        match report.problems() {
            0 => Ok(()),
            problems => Err(CliError::CheckFailed { problems }),
        }
    }
}
