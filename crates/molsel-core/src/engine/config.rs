use crate::core::geometry::boundary::DirectionSet;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_HISTORY_CAPACITY: usize = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}

/// Tunables of the selection manager.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct SelectionConfig {
    /// Maximum number of entries kept in the additions history.
    pub history_capacity: usize,
    /// Sampling directions used when fitting the enclosing sphere of the selection.
    pub boundary_directions: DirectionSet,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            boundary_directions: DirectionSet::default(),
        }
    }
}

impl SelectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "history_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SelectionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[derive(Default)]
pub struct SelectionConfigBuilder {
    history_capacity: Option<usize>,
    boundary_directions: Option<DirectionSet>,
}

impl SelectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }
    pub fn boundary_directions(mut self, directions: DirectionSet) -> Self {
        self.boundary_directions = Some(directions);
        self
    }

    pub fn build(self) -> Result<SelectionConfig, ConfigError> {
        let defaults = SelectionConfig::default();
        let config = SelectionConfig {
            history_capacity: self.history_capacity.unwrap_or(defaults.history_capacity),
            boundary_directions: self
                .boundary_directions
                .unwrap_or(defaults.boundary_directions),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builder_uses_defaults_for_missing_values() {
        let config = SelectionConfigBuilder::new().build().unwrap();
        assert_eq!(config, SelectionConfig::default());
        assert_eq!(config.history_capacity, 8);
    }

    #[test]
    fn builder_rejects_zero_capacity() {
        let result = SelectionConfigBuilder::new().history_capacity(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "history_capacity",
                ..
            })
        ));
    }

    #[test]
    fn toml_keys_are_kebab_case() {
        let config = SelectionConfig::from_toml_str(
            "history-capacity = 3\nboundary-directions = \"dop14\"\n",
        )
        .unwrap();
        assert_eq!(config.history_capacity, 3);
        assert_eq!(config.boundary_directions, DirectionSet::Dop14);
    }

    #[test]
    fn toml_fills_missing_keys_with_defaults() {
        let config = SelectionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SelectionConfig::default());
    }

    #[test]
    fn toml_rejects_unknown_keys_and_invalid_values() {
        assert!(matches!(
            SelectionConfig::from_toml_str("history-size = 3"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SelectionConfig::from_toml_str("history-capacity = 0"),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn load_reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "history-capacity = 4").unwrap();

        let config = SelectionConfig::load(file.path()).unwrap();
        assert_eq!(config.history_capacity, 4);
    }
}
