//! Composer configuration.
//!
//! # Responsibility
//! - Declare startup settings: initial mode, history depth, log level and
//!   export options.
//! - Parse partial JSON declarations over built-in defaults.
//!
//! # Invariants
//! - A config returned by `from_json_str` has already passed `validate()`.

use crate::export::options::{ExportOptions, ExportOptionsError};
use crate::logging::{default_log_level, normalize_level, LoggingError};
use crate::mode::Mode;
use crate::store::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound for configured undo depth.
pub const MAX_HISTORY_LIMIT: usize = 1_000;

/// Startup configuration for one composer session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    pub initial_mode: Mode,
    /// Undo steps kept by the store. `0` disables history.
    pub history_limit: usize,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    pub export: ExportOptions,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            initial_mode: Mode::Edit,
            history_limit: DEFAULT_HISTORY_LIMIT,
            log_level: default_log_level().to_string(),
            export: ExportOptions::default(),
        }
    }
}

impl ComposerConfig {
    /// Parses and validates a JSON declaration. Missing fields use defaults.
    ///
    /// # Errors
    /// - `ConfigError::Parse` for malformed JSON.
    /// - Any error from `validate()`.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit > MAX_HISTORY_LIMIT {
            return Err(ConfigError::HistoryLimitTooLarge {
                limit: self.history_limit,
                max: MAX_HISTORY_LIMIT,
            });
        }
        normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        self.export.validate()?;
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    HistoryLimitTooLarge { limit: usize, max: usize },
    InvalidLogLevel(LoggingError),
    Export(ExportOptionsError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::HistoryLimitTooLarge { limit, max } => {
                write!(f, "history_limit {limit} exceeds maximum {max}")
            }
            Self::InvalidLogLevel(err) => write!(f, "invalid log level: {err}"),
            Self::Export(err) => write!(f, "invalid export options: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::InvalidLogLevel(err) => Some(err),
            Self::Export(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ExportOptionsError> for ConfigError {
    fn from(value: ExportOptionsError) -> Self {
        Self::Export(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ComposerConfig, ConfigError};
    use crate::logging::LoggingError;
    use crate::mode::Mode;
    use std::error::Error;

    #[test]
    fn empty_object_yields_defaults() {
        let config = ComposerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ComposerConfig::default());
        assert_eq!(config.initial_mode, Mode::Edit);
    }

    #[test]
    fn accepts_preview_start_and_custom_export() {
        let config = ComposerConfig::from_json_str(
            r#"{"initial_mode":"preview","export":{"destination_name":"cv.pdf"}}"#,
        )
        .unwrap();
        assert_eq!(config.initial_mode, Mode::Preview);
        assert_eq!(config.export.destination_name, "cv.pdf");
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            ComposerConfig::from_json_str(r#"{"history_limit":5000}"#),
            Err(ConfigError::HistoryLimitTooLarge { limit: 5000, .. })
        ));
        assert!(matches!(
            ComposerConfig::from_json_str(r#"{"log_level":"loud"}"#),
            Err(ConfigError::InvalidLogLevel(_))
        ));
        assert!(matches!(
            ComposerConfig::from_json_str(r#"{"export":{"raster_scale":-1.0}}"#),
            Err(ConfigError::Export(_))
        ));
        assert!(matches!(
            ComposerConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn invalid_log_level_keeps_typed_source() {
        let err = ComposerConfig::from_json_str(r#"{"log_level":" Loud "}"#).unwrap_err();
        match &err {
            ConfigError::InvalidLogLevel(inner) => {
                assert_eq!(inner, &LoggingError::UnsupportedLevel("Loud".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
        let source = err.source().expect("log level error has a source");
        assert!(source.to_string().contains("unsupported log level `Loud`"));
        assert!(err.to_string().starts_with("invalid log level: "));
    }
}
