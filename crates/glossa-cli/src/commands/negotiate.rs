//! Negotiate command implementation.

use clap::Parser;
use glossa_i18n::{detect_locale, negotiate, parse_accept_language, I18nError, Locale};
use serde::Serialize;
use tracing::debug;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Pick the best available locale for a preference list
#[derive(Debug, Parser)]
pub struct NegotiateCommand {
    /// Available locales (defaults to the configured or discovered ones)
    #[arg(long, value_delimiter = ',')]
    pub available: Vec<Locale>,

    /// An Accept-Language header (defaults to the environment's locale)
    #[arg(long)]
    pub accept: Option<String>,
}

#[derive(Debug, Serialize)]
struct NegotiateOutput {
    locale: Locale,
    available: Vec<Locale>,
    preferred: Vec<Locale>,
}

impl FormattedOutput for NegotiateOutput {
    fn format_text(&self) -> String {
        self.locale.to_string()
    }
}

impl NegotiateCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let available = if self.available.is_empty() {
            ctx.i18n()?.available()?
        } else {
            self.available.clone()
        };

        let preferred = match &self.accept {
            Some(header) => parse_accept_language(header),
            None => detect_locale().into_iter().collect(),
        };
        debug!(?available, ?preferred, "negotiating");

        let locale = negotiate(&available, &preferred).map_err(I18nError::from)?;

        print_output(
            ctx.format,
            &NegotiateOutput {
                locale,
                available,
                preferred,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command, OutputFormat};
    use glossa_config::GlossaConfig;
    use glossa_i18n::NegotiationError;
    use glossa_test_utils::{assert_err, LocaleTree};

    fn parse(args: &[&str]) -> NegotiateCommand {
        let argv = ["glossa", "negotiate"].iter().chain(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Negotiate(cmd) => cmd,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_available_list_parsing() {
        let cmd = parse(&["--available", "en, es-mx,fr", "--accept", "fr-CH"]);
        assert_eq!(
            cmd.available,
            vec![
                Locale::parse("en").unwrap(),
                Locale::parse("es-MX").unwrap(),
                Locale::parse("fr").unwrap()
            ]
        );
        assert_eq!(cmd.accept.as_deref(), Some("fr-CH"));
    }

    #[test]
    fn test_invalid_available_locale_is_usage_error() {
        let argv = ["glossa", "negotiate", "--available", "en,english!"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_no_match_is_an_error() {
        let tree = LocaleTree::sample();
        let mut config = GlossaConfig::default();
        config.catalogs.dir = tree.path().to_path_buf();
        let ctx = CommandContext::new(config, ".", OutputFormat::Text);

        let err = assert_err!(parse(&["--accept", "ja, ko;q=0.5"]).execute(&ctx));
        assert!(matches!(err, CliError::I18n(I18nError::Negotiation(NegotiationError::NoMatch))));
    }
}
