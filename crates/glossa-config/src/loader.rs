//! Configuration file loading and parsing.

use crate::env::apply_overrides;
use crate::types::GlossaConfig;
use glossa_i18n::Locale;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Config file location relative to the project directory.
pub const CONFIG_FILE: &str = ".glossa/config.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    Parse { line: Option<usize>, message: String },

    #[error("failed to serialize config: {message}")]
    Serialize { message: String },

    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },

    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    base_path: PathBuf,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for `<project_dir>/.glossa/config.yaml`.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        let base_path = project_dir.as_ref().to_path_buf();
        Self {
            config_path: base_path.join(CONFIG_FILE),
            base_path,
        }
    }

    /// Create a loader for an explicit config file.
    ///
    /// Relative paths inside the file resolve against the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let config_path = path.as_ref().to_path_buf();
        let base_path = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            base_path,
            config_path,
        }
    }

    /// Directory that relative catalog paths resolve against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration, applying `GLOSSA_*` environment overrides.
    ///
    /// A missing file yields the defaults.
    pub fn load(&self) -> Result<GlossaConfig, ConfigError> {
        self.load_with(|name| std::env::var(name).ok())
    }

    /// Like [`load`](Self::load), reading variables through `var`.
    pub fn load_with(
        &self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<GlossaConfig, ConfigError> {
        let mut config = if self.config_path.exists() {
            let contents =
                std::fs::read_to_string(&self.config_path).map_err(|source| ConfigError::Io {
                    path: self.config_path.clone(),
                    source,
                })?;
            let expanded = expand_env_vars(&contents, &var)?;
            let config = parse(&expanded)?;
            debug!(path = %self.config_path.display(), "loaded config");
            config
        } else {
            debug!(path = %self.config_path.display(), "no config file, using defaults");
            GlossaConfig::default()
        };

        apply_overrides(&mut config, &var)?;
        validate(&config)?;
        Ok(config)
    }

    /// Save configuration to the loader's file.
    pub fn save(&self, config: &GlossaConfig) -> Result<(), ConfigError> {
        if let Some(dir) = self.config_path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })?;

        std::fs::write(&self.config_path, yaml).map_err(|source| ConfigError::Io {
            path: self.config_path.clone(),
            source,
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}

/// Parse YAML config text (no expansion, overrides or validation).
pub fn parse(yaml: &str) -> Result<GlossaConfig, ConfigError> {
    serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    })
}

/// Expand `${VAR}` and `${VAR:-default}` using `var` for lookups.
pub fn expand_env_vars(
    content: &str,
    var: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")?;

    let mut result = String::with_capacity(content.len());
    let mut last = 0;
    for cap in re.captures_iter(content) {
        let Some(whole) = cap.get(0) else { continue };
        let name = &cap[1];

        let value = match (var(name), cap.get(2)) {
            (Some(value), _) => value,
            (None, Some(default)) => default.as_str().to_string(),
            (None, None) => {
                return Err(ConfigError::EnvVarNotFound {
                    var: name.to_string(),
                })
            }
        };

        result.push_str(&content[last..whole.start()]);
        result.push_str(&value);
        last = whole.end();
    }
    result.push_str(&content[last..]);

    Ok(result)
}

fn check_locale(field: &str, code: &str) -> Result<Locale, ConfigError> {
    Locale::parse(code).map_err(|e| ConfigError::Validation {
        message: format!("{field}: {e}"),
    })
}

/// Validate configuration values.
pub fn validate(config: &GlossaConfig) -> Result<(), ConfigError> {
    if config.catalogs.domain.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "catalogs.domain must not be empty".to_string(),
        });
    }

    let default = check_locale("locales.default", &config.locales.default)?;
    let fallback = config
        .locales
        .fallback
        .as_deref()
        .map(|code| check_locale("locales.fallback", code))
        .transpose()?;

    let mut supported = Vec::with_capacity(config.locales.supported.len());
    for code in &config.locales.supported {
        supported.push(check_locale("locales.supported", code)?);
    }

    if !supported.is_empty() {
        if !supported.contains(&default) {
            return Err(ConfigError::Validation {
                message: format!("locales.default {default} is not in locales.supported"),
            });
        }
        if let Some(fallback) = fallback.filter(|f| !supported.contains(f)) {
            return Err(ConfigError::Validation {
                message: format!("locales.fallback {fallback} is not in locales.supported"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_i18n::CatalogFormat;
    use glossa_test_utils::{assert_err, assert_ok, temp_dir};
    use std::collections::HashMap;
    use std::fs;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn no_vars(_: &str) -> Option<String> {
        None
    }

    fn write_config(dir: &Path, content: &str) {
        let glossa_dir = dir.join(".glossa");
        fs::create_dir_all(&glossa_dir).unwrap();
        fs::write(glossa_dir.join("config.yaml"), content).unwrap();
    }

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = temp_dir();
        let config = assert_ok!(ConfigLoader::new(dir.path()).load_with(no_vars));
        assert_eq!(config, GlossaConfig::default());
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = temp_dir();
        write_config(
            dir.path(),
            r#"
catalogs:
  dir: i18n
  domain: app
  format: json
locales:
  default: en
  fallback: en-GB
  supported: [en, en-GB, de]
"#,
        );

        let config = assert_ok!(ConfigLoader::new(dir.path()).load_with(no_vars));
        assert_eq!(config.catalogs.dir, PathBuf::from("i18n"));
        assert_eq!(config.catalogs.domain, "app");
        assert_eq!(config.catalogs.format, CatalogFormat::Json);
        assert_eq!(config.locales.fallback.as_deref(), Some("en-GB"));
        assert_eq!(config.supported_locales().len(), 3);
    }

    #[test]
    fn test_env_var_expansion() {
        let out = assert_ok!(expand_env_vars(
            "dir: ${ROOT}/${SUB:-locales} ${ROOT}",
            vars(&[("ROOT", "/srv")])
        ));
        assert_eq!(out, "dir: /srv/locales /srv");
    }

    #[test]
    fn test_env_var_missing_error() {
        match assert_err!(expand_env_vars("key: ${MISSING_VAR}", no_vars)) {
            ConfigError::EnvVarNotFound { var } => assert_eq!(var, "MISSING_VAR"),
            other => panic!("Expected EnvVarNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_env_var_expansion_in_config() {
        let dir = temp_dir();
        write_config(
            dir.path(),
            "catalogs:\n  domain: ${APP_DOMAIN}\nlocales:\n  default: ${LANG_CODE:-fr}\n",
        );

        let config = assert_ok!(ConfigLoader::new(dir.path()).load_with(vars(&[("APP_DOMAIN", "shop")])));
        assert_eq!(config.catalogs.domain, "shop");
        assert_eq!(config.locales.default, "fr");
    }

    #[test]
    fn test_env_overrides_apply_after_file() {
        let dir = temp_dir();
        write_config(dir.path(), "locales:\n  default: en\n");

        let config = assert_ok!(ConfigLoader::new(dir.path()).load_with(vars(&[
            ("GLOSSA_DEFAULT_LOCALE", "de"),
            ("GLOSSA_LOCALE_DIR", "/opt/locales"),
        ])));
        assert_eq!(config.locales.default, "de");
        assert_eq!(config.catalogs.dir, PathBuf::from("/opt/locales"));
    }

    #[test]
    fn test_validation_errors() {
        let mut config = GlossaConfig::default();
        config.catalogs.domain = "  ".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::Validation { message }) if message.contains("domain")));

        let mut config = GlossaConfig::default();
        config.locales.default = "english".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::Validation { message }) if message.contains("locales.default")));

        let mut config = GlossaConfig::default();
        config.locales.supported = vec!["en".into(), "es".into()];
        config.locales.fallback = Some("fr".into());
        assert!(matches!(validate(&config), Err(ConfigError::Validation { message }) if message.contains("fallback")));

        let mut config = GlossaConfig::default();
        config.locales.supported = vec!["es".into()];
        assert!(matches!(validate(&config), Err(ConfigError::Validation { message }) if message.contains("default")));

        let mut config = GlossaConfig::default();
        config.locales.fallback = Some("fr".into());
        assert_ok!(validate(&config));
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let dir = temp_dir();
        write_config(dir.path(), "catalogs:\n  domain: app\n  dir: [unclosed\n");

        match assert_err!(ConfigLoader::new(dir.path()).load_with(no_vars)) {
            ConfigError::Parse { line, .. } => assert!(line.is_some()),
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_save_and_reload() {
        let dir = temp_dir();
        let loader = ConfigLoader::new(dir.path());

        let mut config = GlossaConfig::default();
        config.catalogs.domain = "shop".to_string();
        config.locales.supported = vec!["en".into(), "ja".into()];
        assert_ok!(loader.save(&config));

        assert!(dir.path().join(CONFIG_FILE).is_file());
        assert_eq!(assert_ok!(loader.load_with(no_vars)), config);
    }

    #[test]
    fn test_from_file_base_path() {
        let loader = ConfigLoader::from_file("/work/site/glossa.yaml");
        assert_eq!(loader.base_path(), Path::new("/work/site"));
        assert_eq!(loader.config_path(), Path::new("/work/site/glossa.yaml"));
    }
}
