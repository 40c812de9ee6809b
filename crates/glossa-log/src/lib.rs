//! Logging infrastructure for Glossa.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Full `EnvFilter` directives (e.g. `glossa_i18n=trace,warn`); overrides `level`.
    pub filter: Option<String>,
    /// Output format.
    pub format: LogFormat,
    /// Also append log lines to this file.
    pub file_path: Option<PathBuf>,
    /// Include source location.
    pub source_location: bool,
    /// Include span open/close events.
    pub span_events: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl LogLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Level for a `-v` count: none is `warn`, then `info`, `debug`, `trace`.
    pub fn from_verbosity(verbose: u8) -> Self {
        match verbose {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON structured format.
    Json,
}

impl LogFormat {
    /// Parse from string; anything unrecognized is `Pretty`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            filter: None,
            format: LogFormat::default(),
            file_path: None,
            source_location: false,
            span_events: false,
        }
    }
}

fn flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

impl LogConfig {
    /// Create config from environment variables.
    ///
    /// `GLOSSA_LOG_LEVEL` takes precedence over `RUST_LOG`. A `RUST_LOG`
    /// that is not a bare level is used as filter directives.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = var("GLOSSA_LOG_LEVEL").and_then(|l| LogLevel::parse(&l)) {
            config.level = level;
        } else if let Some(rust_log) = var("RUST_LOG").filter(|v| !v.trim().is_empty()) {
            match LogLevel::parse(&rust_log) {
                Some(level) => config.level = level,
                None => config.filter = Some(rust_log),
            }
        }

        if let Some(format) = var("GLOSSA_LOG_FORMAT") {
            config.format = LogFormat::parse(&format);
        }

        if let Some(file_path) = var("GLOSSA_LOG_FILE").filter(|p| !p.is_empty()) {
            config.file_path = Some(PathBuf::from(file_path));
        }

        if let Some(source_location) = var("GLOSSA_LOG_SOURCE") {
            config.source_location = flag(&source_location);
        }

        if let Some(span_events) = var("GLOSSA_LOG_SPANS") {
            config.span_events = flag(&span_events);
        }

        config
    }

    /// Environment config with command-line verbosity on top.
    ///
    /// `quiet` wins over `verbose`. With neither flag the environment
    /// decides, defaulting to `warn`.
    pub fn for_verbosity(verbose: u8, quiet: bool) -> Self {
        Self::for_verbosity_with(Self::from_env(), verbose, quiet, |name| {
            std::env::var_os(name).is_some()
        })
    }

    fn for_verbosity_with(
        mut config: Self,
        verbose: u8,
        quiet: bool,
        is_set: impl Fn(&str) -> bool,
    ) -> Self {
        if quiet {
            config.level = LogLevel::Error;
            config.filter = None;
        } else if verbose > 0 {
            config.level = LogLevel::from_verbosity(verbose);
            config.filter = None;
        } else if !is_set("GLOSSA_LOG_LEVEL") && !is_set("RUST_LOG") {
            config.level = LogLevel::from_verbosity(0);
        }
        config
    }

    fn env_filter(&self) -> Result<EnvFilter, LogError> {
        match &self.filter {
            Some(directives) => {
                EnvFilter::try_new(directives).map_err(|e| LogError::Filter(e.to_string()))
            }
            None => Ok(EnvFilter::new(self.level.as_str())),
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn layer<W>(&self, writer: W, ansi: bool) -> Box<dyn Layer<Registry> + Send + Sync>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(true)
            .with_file(self.source_location)
            .with_line_number(self.source_location)
            .with_span_events(self.span_events());

        match self.format {
            LogFormat::Pretty => layer.boxed(),
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Json => layer.json().boxed(),
        }
    }
}

/// Initialize logging with the given configuration.
///
/// Logs go to stderr, and additionally to `file_path` when set.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = config.env_filter()?;

    let mut layers = vec![config.layer(io::stderr, true)];
    if let Some(path) = &config.file_path {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogError::File {
                path: path.clone(),
                source,
            })?;
        layers.push(config.layer(Mutex::new(file), false));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LogError::Init(e.to_string()))
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    Init(String),

    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("failed to open log file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Convenience macros re-exported from tracing.
pub use tracing::{debug, error, info, trace, warn};
