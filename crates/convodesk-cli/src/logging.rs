//! Logging configuration and initialization.
//!
//! Presets are selected by CLI flags, with `RUST_LOG` taking precedence when
//! set. Output can be plain text or JSON.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: '{}'. Use 'text' or 'json'.", s)),
        }
    }
}

/// Logging preset levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogPreset {
    /// Store activity at info, tree traversal noise suppressed.
    #[default]
    Production,
    /// Operational detail for every target.
    Verbose,
    /// Everything, including per-directory traversal messages.
    Debug,
    /// Warnings and errors only.
    Quiet,
}

impl LogPreset {
    /// Pick a preset from CLI flags. Quiet wins over debug wins over verbose.
    pub fn from_flags(verbose: bool, debug: bool, quiet: bool) -> Self {
        if quiet {
            LogPreset::Quiet
        } else if debug {
            LogPreset::Debug
        } else if verbose {
            LogPreset::Verbose
        } else {
            LogPreset::Production
        }
    }

    fn directives(self) -> &'static str {
        match self {
            LogPreset::Production => {
                "convodesk::startup=info,convodesk::store=info,convodesk::db=info,convodesk::tree=warn"
            }
            LogPreset::Verbose => "convodesk=info",
            LogPreset::Debug => "convodesk=debug",
            LogPreset::Quiet => "convodesk=warn",
        }
    }

    /// Build an `EnvFilter`, honoring `RUST_LOG` when present.
    pub fn build_filter(self) -> EnvFilter {
        if let Ok(env_filter) = EnvFilter::try_from_default_env() {
            return env_filter;
        }
        EnvFilter::try_new(self.directives()).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the tracing subscriber.
pub fn init(preset: LogPreset, format: LogFormat) {
    let filter = preset.build_filter();

    match format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_file(false)
                        .with_line_number(false),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(true))
                .init();
        }
    }
}
