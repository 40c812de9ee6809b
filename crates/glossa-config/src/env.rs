//! Environment variable handling.

use crate::loader::ConfigError;
use crate::types::GlossaConfig;
use glossa_i18n::CatalogFormat;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable names.
pub mod vars {
    /// Explicit config file, instead of `.glossa/config.yaml`.
    pub const GLOSSA_CONFIG: &str = "GLOSSA_CONFIG";
    pub const GLOSSA_LOCALE_DIR: &str = "GLOSSA_LOCALE_DIR";
    pub const GLOSSA_DEFAULT_LOCALE: &str = "GLOSSA_DEFAULT_LOCALE";
    pub const GLOSSA_FALLBACK_LOCALE: &str = "GLOSSA_FALLBACK_LOCALE";
    pub const GLOSSA_DOMAIN: &str = "GLOSSA_DOMAIN";
    /// `po` or `json`.
    pub const GLOSSA_FORMAT: &str = "GLOSSA_FORMAT";
}

/// Load `.env` then `.env.local` from `dir`, if present.
///
/// Variables already set in the process are not overwritten. Returns the
/// files that were loaded.
pub fn load_dotenv(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let mut loaded = Vec::new();

    for name in [".env", ".env.local"] {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }
        dotenvy::from_path(&path)?;
        debug!(path = %path.display(), "loaded env file");
        loaded.push(path);
    }

    Ok(loaded)
}

/// Apply `GLOSSA_*` overrides on top of a loaded config.
pub fn apply_overrides(
    config: &mut GlossaConfig,
    var: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    let get = |name: &str| var(name).filter(|v| !v.trim().is_empty());

    if let Some(dir) = get(vars::GLOSSA_LOCALE_DIR) {
        config.catalogs.dir = PathBuf::from(dir);
    }
    if let Some(domain) = get(vars::GLOSSA_DOMAIN) {
        config.catalogs.domain = domain;
    }
    if let Some(format) = get(vars::GLOSSA_FORMAT) {
        config.catalogs.format = parse_format(&format).ok_or_else(|| ConfigError::InvalidValue {
            var: vars::GLOSSA_FORMAT.to_string(),
            message: format!("expected po or json, got {format:?}"),
        })?;
    }
    if let Some(default) = get(vars::GLOSSA_DEFAULT_LOCALE) {
        config.locales.default = default;
    }
    if let Some(fallback) = get(vars::GLOSSA_FALLBACK_LOCALE) {
        config.locales.fallback = Some(fallback);
    }

    Ok(())
}

fn parse_format(value: &str) -> Option<CatalogFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "po" => Some(CatalogFormat::Po),
        "json" => Some(CatalogFormat::Json),
        _ => None,
    }
}
