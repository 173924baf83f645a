use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preferred caption languages, tried in order
    pub languages: Vec<String>,

    /// HTTP client settings
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent with watch-page requests
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: vec![
                "en".to_string(),
                "en-US".to_string(),
                "en-GB".to_string(),
            ],
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or fall back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        match config_path {
            Some(path) if path.exists() => {
                let content =
                    fs_err::read_to_string(&path).context("Failed to read config file")?;
                let config: Config =
                    serde_yaml::from_str(&content).context("Failed to parse config file")?;
                config.validate()?;
                Ok(config)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Get configuration file path
    fn config_path() -> Option<PathBuf> {
        // Current directory first for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir().map(|dir| dir.join("yt-transcript").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            anyhow::bail!("At least one preferred language must be configured");
        }
        if self.http.timeout_secs == 0 {
            anyhow::bail!("HTTP timeout must be greater than zero");
        }
        Ok(())
    }

    /// Request timeout as a Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}
