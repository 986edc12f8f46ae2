//! Logger configuration

mod presets;

use serde::{Deserialize, Serialize};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Multi-line, human oriented.
    Pretty,
    /// Single line per event.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl Format {
    /// Parses a format name, falling back to [`Format::Compact`].
    pub fn parse_lossy(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// What each event line shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// ANSI colors.
    pub colors: bool,
    /// Timestamp.
    pub time: bool,
    /// Module target.
    pub target: bool,
    /// Source file and line.
    pub source: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            time: true,
            target: true,
            source: false,
        }
    }
}

impl DisplayConfig {
    /// Applies `BOOKSHELF_LOG_{COLORS,TIME,TARGET,SOURCE}` overrides.
    pub(crate) fn parse_env(&mut self) {
        let flag = |name: &str| std::env::var(name).ok().and_then(|v| parse_bool(&v));

        if let Some(colors) = flag("BOOKSHELF_LOG_COLORS") {
            self.colors = colors;
        }
        if let Some(time) = flag("BOOKSHELF_LOG_TIME") {
            self.time = time;
        }
        if let Some(target) = flag("BOOKSHELF_LOG_TARGET") {
            self.target = target;
        }
        if let Some(source) = flag("BOOKSHELF_LOG_SOURCE") {
            self.source = source;
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `EnvFilter` directive, e.g. `info` or `bookshelf_catalog=debug,warn`.
    pub level: String,
    /// Output format.
    pub format: Format,
    /// Line contents.
    pub display: DisplayConfig,
    /// Service name attached to a root span when set.
    pub service: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: Format::Compact,
            display: DisplayConfig::default(),
            service: None,
        }
    }
}
