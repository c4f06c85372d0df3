use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BumprError, Result};

/// Project-level configuration file name, looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = ".bumpr.toml";

/// Placeholder substituted with the target version in message templates
const VERSION_PLACEHOLDER: &str = "{version}";

/// Tool names and publication text for a release run.
///
/// Every key is optional; missing keys fall back to the built-in defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote that branches and tags are pushed to
    pub remote: String,

    pub git_program: String,

    /// Release-hosting executable; releases are skipped when it is missing
    pub release_program: String,

    pub commit_message: String,
    pub tag_message: String,
    pub release_title: String,
    pub release_notes: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: "origin".to_string(),
            git_program: "git".to_string(),
            release_program: "gh".to_string(),
            commit_message: "releasing {version}".to_string(),
            tag_message: "Release: {version}".to_string(),
            release_title: "Release {version}".to_string(),
            release_notes: "## Release {version}\n\nAutomated release created by bumpr."
                .to_string(),
        }
    }
}

impl Config {
    pub fn commit_message(&self, version: &str) -> String {
        render(&self.commit_message, version)
    }

    pub fn tag_message(&self, version: &str) -> String {
        render(&self.tag_message, version)
    }

    pub fn release_title(&self, version: &str) -> String {
        render(&self.release_title, version)
    }

    pub fn release_notes(&self, version: &str) -> String {
        render(&self.release_notes, version)
    }
}

fn render(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}

/// `<user config dir>/bumpr/config.toml`, when the platform has a config dir
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bumpr").join("config.toml"))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Explicit path (`--config`), which must exist
/// 2. `.bumpr.toml` in the project directory
/// 3. `bumpr/config.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(explicit: Option<&Path>, project_dir: &Path) -> Result<Config> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(BumprError::config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => {
            let project = project_dir.join(PROJECT_CONFIG_FILE);
            match user_config_path() {
                _ if project.is_file() => project,
                Some(user) if user.is_file() => user,
                _ => {
                    tracing::debug!("no config file found, using defaults");
                    return Ok(Config::default());
                }
            }
        }
    };

    let content = fs::read_to_string(&path).map_err(|e| BumprError::read(&path, e))?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| BumprError::config(format!("{}: {}", path.display(), e.message())))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
