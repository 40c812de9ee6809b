//! CLI argument definitions using clap derive macros.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use glossa_config::{load_dotenv, vars, ConfigLoader, GlossaConfig};
use glossa_i18n::{I18n, Locale, LoaderConfig};
use tracing::debug;

use crate::commands::{CheckCommand, ConvertCommand, NegotiateCommand, TranslateCommand};
use crate::error::CliError;

/// Glossa - translation catalog toolkit
///
/// Convert, check and query gettext PO and JSON catalogs.
#[derive(Debug, Parser)]
#[command(
    name = "glossa",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = vars::GLOSSA_CONFIG,
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a catalog between PO and JSON
    Convert(ConvertCommand),

    /// Check catalogs for parse errors and missing translations
    Check(CheckCommand),

    /// Pick the best available locale for a preference list
    Negotiate(NegotiateCommand),

    /// Look up a translation
    #[command(visible_alias = "t")]
    Translate(TranslateCommand),
}

impl Cli {
    /// Load `.env` files and the project configuration.
    ///
    /// An explicit `--config` file wins; otherwise `.glossa/config.yaml`
    /// under the current directory is used when present.
    pub fn load_config(&self) -> Result<(ConfigLoader, GlossaConfig), CliError> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::from_file(path),
            None => {
                let cwd = std::env::current_dir().map_err(|source| CliError::Io {
                    path: PathBuf::from("."),
                    source,
                })?;
                ConfigLoader::new(cwd)
            }
        };

        let loaded = load_dotenv(loader.base_path())?;
        if !loaded.is_empty() {
            debug!(files = loaded.len(), "loaded env files");
        }

        let config = loader.load()?;
        Ok((loader, config))
    }

    /// Execute the selected command
    pub fn execute(self) -> Result<(), CliError> {
        let (loader, config) = self.load_config()?;
        let ctx = CommandContext {
            config,
            base_path: loader.base_path().to_path_buf(),
            format: self.format,
        };

        match self.command {
            Command::Convert(cmd) => cmd.execute(&ctx),
            Command::Check(cmd) => cmd.execute(&ctx),
            Command::Negotiate(cmd) => cmd.execute(&ctx),
            Command::Translate(cmd) => cmd.execute(&ctx),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: GlossaConfig,
    /// Directory relative catalog paths resolve against.
    pub base_path: PathBuf,
    pub format: OutputFormat,
}

impl CommandContext {
    pub fn new(config: GlossaConfig, base_path: impl AsRef<Path>, format: OutputFormat) -> Self {
        Self {
            config,
            base_path: base_path.as_ref().to_path_buf(),
            format,
        }
    }

    /// Catalog loader settings, relative directories resolved.
    pub fn loader_config(&self) -> LoaderConfig {
        self.config.loader_config_in(&self.base_path)
    }

    pub fn default_locale(&self) -> Result<Locale, CliError> {
        self.config.default_locale().ok_or_else(|| {
            CliError::validation(format!(
                "invalid default locale {:?}",
                self.config.locales.default
            ))
        })
    }

    /// An [`I18n`] over the configured catalogs.
    pub fn i18n(&self) -> Result<I18n, CliError> {
        let mut i18n = I18n::new(self.loader_config(), self.default_locale()?)
            .with_supported(self.config.supported_locales())
            .with_hot_reload(self.config.catalogs.hot_reload);
        if let Some(fallback) = self.config.fallback_locale() {
            i18n = i18n.with_fallback_locale(fallback);
        }
        Ok(i18n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use glossa_test_utils::LocaleTree;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["glossa", "-vv", "--format", "json", "check"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Command::Check(_)));

        assert!(Cli::try_parse_from(["glossa", "-q", "-v", "check"]).is_err());
    }

    #[test]
    fn test_context_i18n() {
        let tree = LocaleTree::sample();
        let mut config = GlossaConfig::default();
        config.catalogs.dir = PathBuf::from(".");
        config.locales.fallback = Some("es".into());

        let ctx = CommandContext::new(config, tree.path(), OutputFormat::Text);
        assert_eq!(ctx.loader_config().locale_dir, tree.path().join("."));

        let i18n = ctx.i18n().unwrap();
        assert_eq!(i18n.default_locale(), &Locale::parse("en").unwrap());
        assert_eq!(i18n.fallback_locale(), &Locale::parse("es").unwrap());
    }

    #[test]
    fn test_context_invalid_default_locale() {
        let mut config = GlossaConfig::default();
        config.locales.default = "not a locale".into();

        let ctx = CommandContext::new(config, ".", OutputFormat::Text);
        assert!(matches!(ctx.default_locale(), Err(CliError::Validation { .. })));
    }
}
