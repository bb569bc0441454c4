//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Output format of the fmt subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"debug,sqlx=warn"`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    ///
    /// A bare level also quiets sqlx statement logging, which is noisy at
    /// `info`.
    pub fn directive(&self) -> String {
        if self.level.contains('=') {
            self.level.clone()
        } else {
            format!("{},sqlx=warn", self.level)
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_quiets_sqlx() {
        let config = LoggingConfig::default();
        assert_eq!(config.directive(), "info,sqlx=warn");
    }

    #[test]
    fn test_explicit_directive_is_kept() {
        let config = LoggingConfig {
            level: "debug,tower_http=info".into(),
            format: LogFormat::Pretty,
        };
        assert_eq!(config.directive(), "debug,tower_http=info");
    }
}
