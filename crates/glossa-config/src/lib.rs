//! Configuration for Glossa projects.
//!
//! Settings live in `.glossa/config.yaml`:
//!
//! ```yaml
//! catalogs:
//!   dir: locales        # <dir>/<locale>/<domain>.<format>
//!   domain: messages
//!   format: po          # or json
//! locales:
//!   default: en
//!   fallback: en        # optional
//!   supported: [en, es] # optional
//! ```
//!
//! `${VAR}` and `${VAR:-default}` are expanded before parsing, and
//! `GLOSSA_*` variables override the file.

pub mod env;
pub mod loader;
pub mod types;

pub use env::{apply_overrides, load_dotenv, vars};
pub use loader::{expand_env_vars, parse, validate, ConfigError, ConfigLoader, CONFIG_FILE};
pub use types::{CatalogsConfig, GlossaConfig, LocalesConfig};
