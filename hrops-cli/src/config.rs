//! Configuration loading
//!
//! Settings live in a TOML file under the platform config directory and can
//! be overridden per-run through environment variables (a local `.env` file
//! is honored). The only mandatory setting is the script endpoint URL; the
//! Drive folder ids are needed only by the document commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::debug;
use serde::{Deserialize, Serialize};

const ENV_ENDPOINT: &str = "HROPS_ENDPOINT_URL";
const ENV_POLICY_FOLDER: &str = "HROPS_POLICY_FOLDER_ID";
const ENV_UPLOAD_FOLDER: &str = "HROPS_UPLOAD_FOLDER_ID";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Apps Script web app URL all requests go to
    #[serde(default)]
    pub endpoint_url: String,
    /// Drive folder holding the shared policy documents
    #[serde(default)]
    pub policy_folder_id: String,
    /// Drive folder receiving uploaded photos and resumes
    #[serde(default)]
    pub upload_folder_id: String,
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("hrops").join("config.toml"))
    }

    /// Loads the config file if present, then applies environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {:?}", path))?
        } else {
            debug!("No config file at {:?}, relying on environment", path);
            Config::default()
        };

        if let Ok(url) = std::env::var(ENV_ENDPOINT) {
            config.endpoint_url = url;
        }
        if let Ok(id) = std::env::var(ENV_POLICY_FOLDER) {
            config.policy_folder_id = id;
        }
        if let Ok(id) = std::env::var(ENV_UPLOAD_FOLDER) {
            config.upload_folder_id = id;
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content).with_context(|| format!("Failed to write config {:?}", path))?;
        Ok(())
    }

    /// The endpoint URL, or a setup hint if it was never configured.
    pub fn require_endpoint(&self) -> Result<&str> {
        if self.endpoint_url.trim().is_empty() {
            bail!(
                "No endpoint configured. Run 'hrops setup --endpoint-url <url>' or set {}",
                ENV_ENDPOINT
            );
        }
        Ok(&self.endpoint_url)
    }

    pub fn require_policy_folder(&self) -> Result<&str> {
        if self.policy_folder_id.trim().is_empty() {
            bail!(
                "No policy folder configured. Run 'hrops setup --policy-folder-id <id>' or set {}",
                ENV_POLICY_FOLDER
            );
        }
        Ok(&self.policy_folder_id)
    }

    pub fn require_upload_folder(&self) -> Result<&str> {
        if self.upload_folder_id.trim().is_empty() {
            bail!(
                "No upload folder configured. Run 'hrops setup --upload-folder-id <id>' or set {}",
                ENV_UPLOAD_FOLDER
            );
        }
        Ok(&self.upload_folder_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            endpoint_url = "https://script.google.com/macros/s/abc/exec"
            policy_folder_id = "folder-1"
            upload_folder_id = "folder-2"
            "#,
        )
        .unwrap();
        assert_eq!(config.policy_folder_id, "folder-1");
        assert!(config.require_endpoint().is_ok());
    }

    #[test]
    fn test_missing_fields_default_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.endpoint_url.is_empty());
        assert!(config.require_endpoint().is_err());
        assert!(config.require_upload_folder().is_err());
    }
}
