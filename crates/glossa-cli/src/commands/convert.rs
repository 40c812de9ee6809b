//! Convert command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use glossa_i18n::{load_file, to_flat_json, to_nested_json, CatalogFormat, I18nError, Locale, PoWriter, Translations};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Convert a catalog between PO and JSON
///
/// Formats are picked from the `.po` / `.json` extensions.
#[derive(Debug, Parser)]
pub struct ConvertCommand {
    /// Catalog to read
    pub input: PathBuf,

    /// File to write
    pub output: PathBuf,

    /// Write nested JSON objects instead of flat dotted keys
    #[arg(long)]
    pub nested: bool,

    /// Language to declare in the PO header
    #[arg(long)]
    pub language: Option<Locale>,
}

#[derive(Debug, Serialize)]
struct ConvertOutput {
    input: PathBuf,
    output: PathBuf,
    keys: usize,
}

impl FormattedOutput for ConvertOutput {
    fn format_text(&self) -> String {
        format!(
            "Converted {} keys: {} -> {}",
            self.keys,
            self.input.display(),
            self.output.display()
        )
    }
}

fn format_of(path: &Path) -> Result<CatalogFormat, CliError> {
    CatalogFormat::from_path(path).ok_or_else(|| {
        CliError::validation(format!(
            "cannot tell the catalog format of {} (expected .po or .json)",
            path.display()
        ))
    })
}

impl ConvertCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let input_format = format_of(&self.input)?;
        let output_format = format_of(&self.output)?;

        let translations = load_file(&self.input, input_format)?;
        debug!(input = %self.input.display(), keys = translations.len(), "loaded catalog");

        let content = self.render(&translations, output_format)?;

        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CliError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.output, content).map_err(|source| CliError::Io {
            path: self.output.clone(),
            source,
        })?;

        print_output(
            ctx.format,
            &ConvertOutput {
                input: self.input.clone(),
                output: self.output.clone(),
                keys: translations.len(),
            },
        )
    }

    fn render(&self, translations: &Translations, format: CatalogFormat) -> Result<String, CliError> {
        match format {
            CatalogFormat::Po => {
                if self.nested {
                    return Err(CliError::validation("--nested only applies to JSON output"));
                }
                let writer = match &self.language {
                    Some(language) => PoWriter::new().with_language(language.clone()),
                    None => PoWriter::new(),
                };
                let po = writer.write(translations).map_err(|source| I18nError::PoWrite {
                    path: self.output.clone(),
                    source,
                })?;
                Ok(po)
            }
            CatalogFormat::Json => {
                if self.language.is_some() {
                    warn!("--language is ignored for JSON output");
                }
                let value = if self.nested {
                    to_nested_json(translations).map_err(|source| I18nError::Json {
                        path: self.output.clone(),
                        source,
                    })?
                } else {
                    to_flat_json(translations)
                };
                let mut json = serde_json::to_string_pretty(&value)
                    .map_err(|e| CliError::Other(anyhow::anyhow!("JSON serialization failed: {e}")))?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}
