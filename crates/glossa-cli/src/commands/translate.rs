//! Translate command implementation.

use clap::Parser;
use glossa_i18n::{detect_locale, interpolate, Locale, Translator};
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Look up a translation
///
/// Without `--locale` the environment's locale is negotiated, then the
/// configured default.
#[derive(Debug, Parser)]
pub struct TranslateCommand {
    /// Message key (e.g. `menu.file`)
    pub key: String,

    /// Locale to translate into
    #[arg(short, long)]
    pub locale: Option<Locale>,

    /// Pick the plural form for this count
    #[arg(short = 'n', long, conflicts_with = "context", allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Disambiguating context (`msgctxt`)
    #[arg(long)]
    pub context: Option<String>,

    /// Placeholder value, NAME=VALUE (repeatable)
    #[arg(short, long = "arg", value_name = "NAME=VALUE", value_parser = parse_arg)]
    pub args: Vec<(String, String)>,
}

fn parse_arg(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got {s:?}")),
    }
}

#[derive(Debug, Serialize)]
struct TranslateOutput {
    key: String,
    locale: Locale,
    text: String,
}

impl FormattedOutput for TranslateOutput {
    fn format_text(&self) -> String {
        self.text.clone()
    }
}

impl TranslateCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let i18n = ctx.i18n()?;
        let preferred: Vec<Locale> = match &self.locale {
            Some(locale) => vec![locale.clone()],
            None => detect_locale().into_iter().collect(),
        };
        let translator = i18n.translator_for(&preferred)?;

        print_output(
            ctx.format,
            &TranslateOutput {
                key: self.key.clone(),
                locale: translator.locale().clone(),
                text: self.render(&translator),
            },
        )
    }

    fn render(&self, translator: &Translator) -> String {
        if let Some(count) = self.count {
            interpolate(&translator.translate_plural(&self.key, count), &self.args)
        } else if let Some(context) = &self.context {
            interpolate(&translator.translate_context(&self.key, context), &self.args)
        } else {
            translator.translate_with(&self.key, &self.args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_i18n::Translations;
    use std::sync::Arc;

    fn translator() -> Translator {
        let store = Translations::new()
            .with("greeting", "Hello, {name}!")
            .with("file.one", "{count} file in {dir}")
            .with("file.other", "{count} files in {dir}")
            .with("open@menu", "Open {what}…");
        Translator::new(Locale::parse("en").unwrap(), Arc::new(store))
    }

    fn command(key: &str) -> TranslateCommand {
        TranslateCommand {
            key: key.to_string(),
            locale: None,
            count: None,
            context: None,
            args: Vec::new(),
        }
    }

    #[test]
    fn test_parse_arg() {
        assert_eq!(parse_arg("name=Ana"), Ok(("name".into(), "Ana".into())));
        assert_eq!(parse_arg("expr=a=b"), Ok(("expr".into(), "a=b".into())));
        assert_eq!(parse_arg("empty="), Ok(("empty".into(), String::new())));
        assert!(parse_arg("name").is_err());
        assert!(parse_arg("=value").is_err());
    }

    #[test]
    fn test_render_modes() {
        let translator = translator();

        let mut cmd = command("greeting");
        cmd.args = vec![("name".into(), "Ana".into())];
        assert_eq!(cmd.render(&translator), "Hello, Ana!");

        let mut cmd = command("file");
        cmd.count = Some(1);
        cmd.args = vec![("dir".into(), "docs".into())];
        assert_eq!(cmd.render(&translator), "1 file in docs");

        let mut cmd = command("open");
        cmd.context = Some("menu".into());
        cmd.args = vec![("what".into(), "file".into())];
        assert_eq!(cmd.render(&translator), "Open file…");

        assert_eq!(command("missing.key").render(&translator), "missing.key");
    }
}
