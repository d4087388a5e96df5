//! Project configuration: `.bref.yml` at the project root.
//!
//! The file is optional; its absence means an empty configuration. Unknown
//! keys are rejected at load time so typos surface immediately instead of
//! being silently ignored.

use std::path::Path;

use serde::Deserialize;

use crate::error::BrefError;

/// Fixed name of the optional configuration file, relative to the project root.
pub const CONFIG_FILE: &str = ".bref.yml";

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BrefConfig {
    /// Override URL for the PHP runtime archive.
    #[serde(default)]
    pub php: Option<String>,

    #[serde(default)]
    pub hooks: Hooks,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Hooks {
    /// Shell commands run in the output directory, in order, after the
    /// dependencies are installed.
    #[serde(default)]
    pub build: Vec<String>,
}

impl BrefConfig {
    /// Load `<project_root>/.bref.yml`. A missing file is not an error.
    pub fn load(project_root: &Path) -> Result<Self, BrefError> {
        let path = project_root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = BrefConfig::load(dir.path()).unwrap();
        assert_eq!(config, BrefConfig::default());
        assert!(config.php.is_none());
        assert!(config.hooks.build.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "php: https://example.com/php-custom.tar.gz\nhooks:\n  build:\n    - echo a\n    - echo b\n",
        )
        .unwrap();

        let config = BrefConfig::load(dir.path()).unwrap();
        assert_eq!(
            config.php.as_deref(),
            Some("https://example.com/php-custom.tar.gz")
        );
        assert_eq!(config.hooks.build, vec!["echo a", "echo b"]);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "phpp: oops\n").unwrap();

        let err = BrefConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, BrefError::Config(_)));
    }

    #[test]
    fn test_malformed_yaml_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "hooks: [unclosed\n").unwrap();

        let err = BrefConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, BrefError::Config(_)));
    }
}
