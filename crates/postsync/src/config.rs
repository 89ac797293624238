//! Sync configuration: hosted-index credentials plus corpus layout.
//!
//! Credentials live in a local YAML file and are passed around as an
//! explicit [`SyncConfig`]; nothing in the crate reads them from ambient
//! state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration loaded from the local YAML config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Hosted search index application id.
    pub application_id: String,
    /// Write-capable API key for the application.
    pub api_key: String,
    /// Index receiving post records.
    #[serde(default = "default_index")]
    pub index: String,
    /// Directory holding markdown posts after a site build.
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    /// Filename glob matched under `source_dir`.
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Base URL override. When unset the endpoint derives from
    /// `application_id`.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Abort a run on the first per-file failure instead of continuing.
    #[serde(default)]
    pub fail_fast: bool,
}

fn default_index() -> String {
    "posts".to_string()
}

fn default_source_dir() -> String {
    "source".to_string()
}

fn default_pattern() -> String {
    "*.markdown".to_string()
}

/// Load configuration from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SyncConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

    let config: SyncConfig =
        serde_yaml_ng::from_str(&content).with_context(|| "Failed to parse YAML configuration")?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration.
pub(crate) fn validate_config(config: &SyncConfig) -> Result<()> {
    if config.application_id.is_empty() {
        anyhow::bail!("application_id cannot be empty");
    }

    if config.api_key.is_empty() {
        anyhow::bail!("api_key cannot be empty");
    }

    if config.index.is_empty() {
        anyhow::bail!("index cannot be empty");
    }

    if config.pattern.is_empty() {
        anyhow::bail!("pattern cannot be empty");
    }

    Ok(())
}

/// Write an example configuration file. Refuses to clobber an existing one.
pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        anyhow::bail!("config file already exists: {}", path.display());
    }

    let example = r#"# postsync configuration
#
# Credentials for the hosted search index. Get the application id and a
# write-capable API key from your provider's dashboard.
application_id: "your-application-id"
api_key: "your-admin-api-key"

# Index that receives one record per post.
index: "posts"

# Where markdown posts live, and which filenames count as posts.
source_dir: "source"
pattern: "*.markdown"

# Abort on the first failure instead of continuing with the rest.
fail_fast: false
"#;

    std::fs::write(path, example)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> SyncConfig {
        SyncConfig {
            application_id: "APP".to_string(),
            api_key: "key".to_string(),
            index: "posts".to_string(),
            source_dir: "source".to_string(),
            pattern: "*.markdown".to_string(),
            endpoint: None,
            fail_fast: false,
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_credentials() {
        let mut config = valid_config();
        config.application_id = String::new();
        assert!(validate_config(&config).is_err());

        let mut config = valid_config();
        config.api_key = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let config: SyncConfig =
            serde_yaml_ng::from_str("application_id: APP\napi_key: key\n").unwrap();
        assert_eq!(config.index, "posts");
        assert_eq!(config.source_dir, "source");
        assert_eq!(config.pattern, "*.markdown");
        assert_eq!(config.endpoint, None);
        assert!(!config.fail_fast);
    }

    #[test]
    fn test_load_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("postsync.yaml");
        create_example_config(&path).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.index, "posts");
        assert_eq!(config.source_dir, "source");
    }

    #[test]
    fn test_create_example_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("postsync.yaml");
        create_example_config(&path).unwrap();
        assert!(create_example_config(&path).is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/postsync.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
