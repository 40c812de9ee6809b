//! Output formatting for command results.

use serde::Serialize;
use std::io::Write;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Types that render as text or JSON.
pub trait FormattedOutput: Serialize {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Render `value` in `format`.
pub fn render<T: FormattedOutput>(format: OutputFormat, value: &T) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(value.format_text()),
        OutputFormat::Json => value
            .format_json()
            .map_err(|e| CliError::Other(anyhow::anyhow!("JSON serialization failed: {e}"))),
    }
}

/// Print formatted output to stdout
pub fn print_output<T: FormattedOutput>(format: OutputFormat, value: &T) -> Result<(), CliError> {
    write_output(format, value, std::io::stdout().lock())
}

/// Print formatted output to a writer
pub fn write_output<T, W>(format: OutputFormat, value: &T, mut writer: W) -> Result<(), CliError>
where
    T: FormattedOutput,
    W: Write,
{
    let output = render(format, value)?;
    writeln!(writer, "{output}").map_err(|source| CliError::Io {
        path: "<stdout>".into(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Message {
        text: String,
    }

    impl FormattedOutput for Message {
        fn format_text(&self) -> String {
            self.text.clone()
        }
    }

    #[test]
    fn test_write_output() {
        let message = Message {
            text: "hola".into(),
        };

        let mut buf = Vec::new();
        write_output(OutputFormat::Text, &message, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "hola\n");

        let mut buf = Vec::new();
        write_output(OutputFormat::Json, &message, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["text"], "hola");
    }
}
