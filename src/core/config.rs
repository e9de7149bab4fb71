//! Dispatcher configuration loaded from TOML
//!
//! Every section is optional; a missing file section falls back to the
//! defaults below, which reproduce the stock desktop behavior.

use crate::core::error::{JarvisError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Scheduled power transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    /// Seconds between a shutdown/restart request and the transition
    pub shutdown_delay_secs: u64,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            shutdown_delay_secs: 10,
        }
    }
}

/// Keyboard and media key injection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Key presses sent per "volume up/down" command
    pub volume_step_presses: u32,
    /// Delay between typed characters (milliseconds)
    pub typing_interval_ms: u64,
    /// Percentage points per "brightness up/down" command
    pub brightness_step: u8,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            volume_step_presses: 5,
            typing_interval_ms: 10,
            brightness_step: 10,
        }
    }
}

/// Filesystem commands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Directory bare names are resolved against (folder creation, delete, rename)
    pub base_dir: PathBuf,
    /// Roots walked by "find"
    pub search_roots: Vec<PathBuf>,
    /// Matches returned to the caller
    pub max_results: usize,
    /// Matches after which the search stops reading directories
    pub scan_limit: usize,
    /// Folder name used when "create folder" has no argument
    pub default_folder_name: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let desktop = dirs::desktop_dir().unwrap_or_else(|| home.join("Desktop"));
        let documents = dirs::document_dir().unwrap_or_else(|| home.join("Documents"));
        let downloads = dirs::download_dir().unwrap_or_else(|| home.join("Downloads"));
        Self {
            base_dir: desktop.clone(),
            search_roots: vec![desktop, documents, downloads],
            max_results: 5,
            scan_limit: 20,
            default_folder_name: "New Folder".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    /// Where captures are written (created on demand)
    pub directory: PathBuf,
    /// File name prefix, followed by a timestamp
    pub prefix: String,
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            directory: dirs::picture_dir().unwrap_or_else(|| home.join("Pictures")),
            prefix: "jarvis_screenshot".to_string(),
        }
    }
}

/// HTTP shell
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Reported by `GET /status`
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            version: "2.0".to_string(),
        }
    }
}

/// Complete dispatcher configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JarvisConfig {
    #[serde(default)]
    pub power: PowerConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub screenshot: ScreenshotConfig,
    #[serde(default)]
    pub server: ServerConfig,
    /// Extra friendly app names for "open", mapped to the program to launch.
    /// Entries here take precedence over the built-in table.
    #[serde(default)]
    pub apps: BTreeMap<String, String>,
    /// Extra site names for "go to", mapped to a URL
    #[serde(default)]
    pub sites: BTreeMap<String, String>,
}

impl JarvisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: JarvisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.files.max_results == 0 {
            return Err(JarvisError::Config("files.max_results must be at least 1".into()));
        }

        if self.files.scan_limit < self.files.max_results {
            return Err(JarvisError::Config(format!(
                "files.scan_limit ({}) should be >= files.max_results ({})",
                self.files.scan_limit, self.files.max_results
            )));
        }

        if self.input.brightness_step == 0 || self.input.brightness_step > 100 {
            return Err(JarvisError::Config(format!(
                "input.brightness_step ({}) must be between 1 and 100",
                self.input.brightness_step
            )));
        }

        if self.files.default_folder_name.trim().is_empty() {
            return Err(JarvisError::Config(
                "files.default_folder_name must not be empty".into(),
            ));
        }

        for (name, url) in &self.sites {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(JarvisError::Config(format!(
                    "sites.{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        Ok(())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<JarvisConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        JarvisError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    JarvisConfig::from_toml_str(&contents)
}

/// Load the file when given, otherwise fall back to defaults
pub fn load_or_default(path: Option<&Path>) -> Result<JarvisConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(JarvisConfig::default()),
    }
}
