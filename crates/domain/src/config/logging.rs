use serde::{Deserialize, Serialize};

/// Logging configuration. Logs always go to stderr.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive: "trace", "debug", "info", "warn", "error",
    /// or a full `EnvFilter` string such as "cloudmap=debug,warn"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit one JSON object per event instead of human-readable lines
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
