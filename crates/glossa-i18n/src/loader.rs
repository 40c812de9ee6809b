//! Catalog loading.

use crate::json::JsonError;
use crate::locale::Locale;
use crate::po::parse_po;
use crate::translations::Translations;
use crate::I18nError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Catalog loader configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory containing one subdirectory per locale.
    pub locale_dir: PathBuf,
    /// Domain name; the catalog file stem (e.g., "messages").
    pub domain: String,
    /// File format to load.
    pub format: CatalogFormat,
}

/// Catalog file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    /// Gettext `.po`.
    #[default]
    Po,
    /// Flat or nested `.json`.
    Json,
}

impl CatalogFormat {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Po => "po",
            Self::Json => "json",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("po") {
            Some(Self::Po)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            locale_dir: PathBuf::from("locales"),
            domain: "messages".to_string(),
            format: CatalogFormat::Po,
        }
    }
}

impl LoaderConfig {
    /// Default domain and format under `locale_dir`.
    pub fn new(locale_dir: impl Into<PathBuf>) -> Self {
        Self {
            locale_dir: locale_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_format(mut self, format: CatalogFormat) -> Self {
        self.format = format;
        self
    }

    /// `<locale_dir>/<locale>/<domain>.<ext>`
    pub fn catalog_path(&self, locale: &Locale) -> PathBuf {
        self.locale_dir
            .join(locale.to_string())
            .join(format!("{}.{}", self.domain, self.format.extension()))
    }
}

/// Load the catalog for a locale.
///
/// A missing file yields an empty store.
pub fn load_catalog(config: &LoaderConfig, locale: &Locale) -> Result<Translations, I18nError> {
    let path = config.catalog_path(locale);

    if !path.exists() {
        debug!(%locale, path = %path.display(), "no catalog file, using empty catalog");
        return Ok(Translations::new());
    }

    let translations = load_file(&path, config.format)?;
    debug!(%locale, path = %path.display(), keys = translations.len(), "loaded catalog");
    Ok(translations)
}

/// Load a single catalog file.
pub fn load_file(path: &Path, format: CatalogFormat) -> Result<Translations, I18nError> {
    let content = fs::read_to_string(path).map_err(|source| I18nError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        CatalogFormat::Po => parse_po(&content)
            .map(|entries| Translations::from_entries(&entries))
            .map_err(|source| I18nError::Parse {
                path: path.to_path_buf(),
                source,
            }),
        CatalogFormat::Json => {
            Translations::from_json_str(&content).map_err(|source: JsonError| I18nError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Locales that have a directory under `locale_dir`, sorted.
///
/// Directory names that are not locale codes are skipped.
pub fn discover_locales(config: &LoaderConfig) -> Result<Vec<Locale>, I18nError> {
    let io_err = |source| I18nError::Io {
        path: config.locale_dir.clone(),
        source,
    };

    let mut locales = Vec::new();
    for entry in fs::read_dir(&config.locale_dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !entry.file_type().map_err(io_err)?.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        match Locale::parse(&name) {
            Ok(locale) => locales.push(locale),
            Err(e) => debug!(dir = %name, error = %e, "skipping non-locale directory"),
        }
    }

    locales.sort();
    locales.dedup();
    Ok(locales)
}

/// Load several locales. One bad file does not stop the others.
pub fn load_all(
    config: &LoaderConfig,
    locales: &[Locale],
) -> Vec<(Locale, Result<Translations, I18nError>)> {
    locales
        .iter()
        .map(|locale| {
            let result = load_catalog(config, locale);
            if let Err(e) = &result {
                warn!(%locale, error = %e, "failed to load catalog");
            }
            (locale.clone(), result)
        })
        .collect()
}

/// Lazy catalog cache with optional hot reload.
///
/// Catalogs are handed out as `Arc<Translations>`. A reload builds a new
/// store and swaps the `Arc`; holders of the old one keep a consistent view.
#[derive(Debug)]
pub struct CatalogCache {
    config: LoaderConfig,
    catalogs: RwLock<HashMap<Locale, CachedCatalog>>,
    hot_reload: bool,
}

#[derive(Debug)]
struct CachedCatalog {
    translations: Arc<Translations>,
    last_modified: Option<SystemTime>,
}

impl CatalogCache {
    /// Create an empty cache.
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            catalogs: RwLock::new(HashMap::new()),
            hot_reload: false,
        }
    }

    /// Re-read catalogs whose file changed since they were loaded.
    pub fn with_hot_reload(mut self, enabled: bool) -> Self {
        self.hot_reload = enabled;
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Get a catalog, loading it on first use.
    ///
    /// If a reload fails, the error is returned once and the previously
    /// loaded catalog keeps being served until the file changes again.
    pub fn get(&self, locale: &Locale) -> Result<Arc<Translations>, I18nError> {
        let path = self.config.catalog_path(locale);

        {
            let catalogs = self.catalogs.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = catalogs.get(locale) {
                if !self.hot_reload || !is_newer(modified_time(&path), cached.last_modified) {
                    return Ok(Arc::clone(&cached.translations));
                }
                debug!(%locale, path = %path.display(), "catalog changed, reloading");
            }
        }

        let last_modified = modified_time(&path);
        let translations = match load_catalog(&self.config, locale) {
            Ok(translations) => Arc::new(translations),
            Err(e) => {
                let mut catalogs = self.catalogs.write().unwrap_or_else(PoisonError::into_inner);
                if let Some(cached) = catalogs.get_mut(locale) {
                    warn!(%locale, error = %e, "reload failed, keeping previous catalog");
                    cached.last_modified = last_modified;
                }
                return Err(e);
            }
        };

        let mut catalogs = self.catalogs.write().unwrap_or_else(PoisonError::into_inner);
        catalogs.insert(
            locale.clone(),
            CachedCatalog {
                translations: Arc::clone(&translations),
                last_modified,
            },
        );
        Ok(translations)
    }

    /// Load several catalogs up front, stopping at the first failure.
    pub fn preload(&self, locales: &[Locale]) -> Result<(), I18nError> {
        for locale in locales {
            self.get(locale)?;
        }
        Ok(())
    }

    /// Whether a catalog for `locale` is cached.
    pub fn is_loaded(&self, locale: &Locale) -> bool {
        self.catalogs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(locale)
    }

    /// Drop one cached catalog.
    pub fn invalidate(&self, locale: &Locale) {
        self.catalogs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(locale);
    }

    /// Drop all cached catalogs.
    pub fn clear(&self) {
        self.catalogs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Get statistics about loaded catalogs.
    pub fn stats(&self) -> LoaderStats {
        let catalogs = self.catalogs.read().unwrap_or_else(PoisonError::into_inner);
        LoaderStats {
            loaded_locales: catalogs.len(),
            total_keys: catalogs.values().map(|c| c.translations.len()).sum(),
            hot_reload_enabled: self.hot_reload,
        }
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn is_newer(current: Option<SystemTime>, cached: Option<SystemTime>) -> bool {
    match (current, cached) {
        (Some(current), Some(cached)) => current > cached,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Cache statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderStats {
    pub loaded_locales: usize,
    pub total_keys: usize,
    pub hot_reload_enabled: bool,
}
