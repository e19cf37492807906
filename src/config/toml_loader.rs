//! TOML file loading and saving shared by `platforms.toml` and the
//! per-module `skillkit.toml`.
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Load and deserialize a required TOML file.
///
/// # Errors
///
/// Returns [`ConfigError::Unavailable`] if the file cannot be read and
/// [`ConfigError::InvalidSyntax`] if it does not match `T`.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::InvalidSyntax {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })
}

/// Load an optional TOML file, returning `None` when it is missing or
/// malformed.
#[must_use]
pub fn load_optional<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Serialize `value` and write it to `path`, replacing the previous content.
///
/// # Errors
///
/// Returns [`ConfigError::Save`] if serialization or the write fails.
pub fn save_config<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let save_err = |message: String| ConfigError::Save {
        path: path.to_path_buf(),
        message,
    };
    let content = toml::to_string_pretty(value).map_err(|e| save_err(e.to_string()))?;
    std::fs::write(path, content).map_err(|e| save_err(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
    struct Sample {
        #[serde(default)]
        names: Vec<String>,
    }

    #[test]
    fn load_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config::<Sample>(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Unavailable { .. }));
    }

    #[test]
    fn load_malformed_file_is_invalid_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "names = [unterminated").unwrap();
        let err = load_config::<Sample>(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSyntax { .. }));
    }

    #[test]
    fn load_optional_ignores_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        assert!(load_optional::<Sample>(&path).is_none());
        std::fs::write(&path, "names = 3").unwrap();
        assert!(load_optional::<Sample>(&path).is_none());
    }

    #[test]
    fn save_then_load_preserves_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.toml");
        let value = Sample {
            names: vec!["b".to_string(), "a".to_string()],
        };
        save_config(&path, &value).unwrap();
        assert_eq!(load_config::<Sample>(&path).unwrap(), value);
    }
}
