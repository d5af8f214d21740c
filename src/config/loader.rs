//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Read and deserialize a TOML file without semantic validation.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_reports_validation_errors() {
        let doc = "[channel_buffers]\nbroadcast_buffer_multiplier = 2\n";
        let err = parse_config(doc).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: channel_buffers.node_message_buffer_multiplier \
             must be greater than zero"
        );
    }

    #[test]
    fn test_parse_rejects_bad_syntax() {
        assert!(matches!(parse_config("name = "), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_read_skips_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[jobs]\nenabled = true\n").unwrap();

        let config = read_config(file.path()).unwrap();
        assert!(config.jobs.as_ref().is_some_and(|jobs| jobs.enabled));
        assert!(matches!(load_config(file.path()), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/app.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
