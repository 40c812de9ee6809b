//! Configuration types.

use glossa_i18n::{CatalogFormat, Locale, LoaderConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossaConfig {
    /// Where catalogs live and how they are stored.
    pub catalogs: CatalogsConfig,
    /// Locale selection.
    pub locales: LocalesConfig,
}

/// Catalog storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogsConfig {
    /// Directory with one subdirectory per locale.
    pub dir: PathBuf,
    /// Catalog file stem.
    pub domain: String,
    /// Catalog file format.
    pub format: CatalogFormat,
    /// Re-read catalogs when their files change.
    pub hot_reload: bool,
}

impl Default for CatalogsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("locales"),
            domain: "messages".to_string(),
            format: CatalogFormat::Po,
            hot_reload: false,
        }
    }
}

/// Locale configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalesConfig {
    /// Used when negotiation finds nothing, and as the reference for `check`.
    pub default: String,
    /// Backs lookups that miss; the default locale when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    /// Restricts negotiation to these locales; every locale on disk when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub supported: Vec<String>,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            default: "en".to_string(),
            fallback: None,
            supported: Vec::new(),
        }
    }
}

impl GlossaConfig {
    /// Loader settings, with the catalog directory taken as-is.
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            locale_dir: self.catalogs.dir.clone(),
            domain: self.catalogs.domain.clone(),
            format: self.catalogs.format,
        }
    }

    /// Loader settings with a relative catalog directory resolved against `base`.
    pub fn loader_config_in(&self, base: &Path) -> LoaderConfig {
        let mut config = self.loader_config();
        if config.locale_dir.is_relative() {
            config.locale_dir = base.join(&config.locale_dir);
        }
        config
    }

    /// The default locale. Call after validation.
    pub fn default_locale(&self) -> Option<Locale> {
        Locale::parse(&self.locales.default).ok()
    }

    /// The locale that backs lookups: `fallback` if set, else `default`.
    pub fn fallback_locale(&self) -> Option<Locale> {
        match &self.locales.fallback {
            Some(fallback) => Locale::parse(fallback).ok(),
            None => self.default_locale(),
        }
    }

    /// The `supported` list as locales, skipping codes that do not parse.
    pub fn supported_locales(&self) -> Vec<Locale> {
        self.locales
            .supported
            .iter()
            .filter_map(|code| Locale::parse(code).ok())
            .collect()
    }
}
