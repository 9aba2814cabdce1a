use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default width of each scanning window, in base pairs
pub const DEFAULT_WINDOW_WIDTH: i64 = 1_000_000;

/// Default margin added on both sides of a window when matching study SNPs
pub const DEFAULT_FLANKING_WIDTH: i64 = 250_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Window geometry for a scan.
///
/// Passed explicitly to the partitioner and drivers; nothing reads it from global
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Width of each non-overlapping window (bp), must be positive
    pub window_width: i64,
    /// Margin added on both sides of a window for the study dataset (bp)
    pub flanking_width: i64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            flanking_width: DEFAULT_FLANKING_WIDTH,
        }
    }
}

impl ScanConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the widths are out of range.
    pub fn new(window_width: i64, flanking_width: i64) -> Result<Self, ConfigError> {
        let config = Self {
            window_width,
            flanking_width,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load config from a JSON file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read,
    /// `ConfigError::ParseError` for invalid JSON, or `ConfigError::Invalid`
    /// if the values are out of range.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// # Errors
    ///
    /// See [`ScanConfig::load_from_file`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of this config
    #[must_use]
    pub fn with_overrides(
        mut self,
        window_width: Option<i64>,
        flanking_width: Option<i64>,
    ) -> Self {
        if let Some(w) = window_width {
            self.window_width = w;
        }
        if let Some(f) = flanking_width {
            self.flanking_width = f;
        }
        self
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `window_width` is not positive or
    /// `flanking_width` is negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width <= 0 {
            return Err(ConfigError::Invalid(format!(
                "window_width must be positive, got {}",
                self.window_width
            )));
        }
        if self.flanking_width < 0 {
            return Err(ConfigError::Invalid(format!(
                "flanking_width must not be negative, got {}",
                self.flanking_width
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window_width, 1_000_000);
        assert_eq!(config.flanking_width, 250_000);
    }

    #[test]
    fn test_new_validates() {
        assert!(ScanConfig::new(200, 10).is_ok());
        assert!(ScanConfig::new(200, 0).is_ok());
        assert!(matches!(ScanConfig::new(0, 10), Err(ConfigError::Invalid(_))));
        assert!(matches!(ScanConfig::new(200, -1), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_from_json_partial() {
        let config = ScanConfig::from_json(r#"{"window_width": 500}"#).unwrap();
        assert_eq!(config.window_width, 500);
        assert_eq!(config.flanking_width, DEFAULT_FLANKING_WIDTH);

        assert!(ScanConfig::from_json(r#"{"window_width": -5}"#).is_err());
        assert!(ScanConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_with_overrides() {
        let config = ScanConfig::default().with_overrides(Some(200), None);
        assert_eq!(config.window_width, 200);
        assert_eq!(config.flanking_width, DEFAULT_FLANKING_WIDTH);

        let config = config.with_overrides(None, Some(10));
        assert_eq!(config, ScanConfig::new(200, 10).unwrap());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        std::fs::write(&path, r#"{"window_width": 200, "flanking_width": 10}"#).unwrap();
        let config = ScanConfig::load_from_file(&path).unwrap();
        assert_eq!(config, ScanConfig::new(200, 10).unwrap());

        assert!(matches!(
            ScanConfig::load_from_file(&dir.path().join("missing.json")),
            Err(ConfigError::ReadError(_))
        ));
    }
}
