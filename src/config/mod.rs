//! Configuration management for guardian
//!
//! Handles loading, saving, and validating configuration from TOML files.
//! The indicator tables and boost rules used by the classifier and scorer
//! live here so callers never hard-code them per call site.

mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Metadata sanitizer configuration
    #[serde(default)]
    pub sanitize: SanitizeConfig,

    /// Topic classification indicator tables
    #[serde(default)]
    pub classify: TopicIndicators,

    /// Framework scoring tables and boost rules
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Paths configuration (internal, not user-editable)
    #[serde(skip)]
    pub paths: PathsConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_server_bind")]
    pub bind: String,

    /// Port for the scoring API
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Metadata sanitizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizeConfig {
    /// Maximum tag-stripping passes; the scrubber exits early once a pass
    /// makes no change
    #[serde(default = "default_sanitize_passes")]
    pub passes: usize,
}

/// Indicator phrase sets for topic classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicIndicators {
    /// AI indicator phrases for the general classifier
    #[serde(default = "default_ai_indicators")]
    pub ai: Vec<String>,

    /// Quantum indicator phrases for the general classifier
    #[serde(default = "default_quantum_indicators")]
    pub quantum: Vec<String>,

    /// Cybersecurity indicator phrases for the pure-cybersecurity detector
    #[serde(default = "default_cybersecurity_indicators")]
    pub cybersecurity: Vec<String>,

    /// Narrow AI phrase set used only by the cybersecurity detector
    #[serde(default = "default_cyber_ai_indicators")]
    pub cyber_ai: Vec<String>,

    /// Narrow quantum phrase set used only by the cybersecurity detector
    #[serde(default = "default_cyber_quantum_indicators")]
    pub cyber_quantum: Vec<String>,
}

/// A weighted indicator phrase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicator {
    pub phrase: String,
    pub weight: u32,
}

/// An additive boost triggered when any of its phrases is present
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boost {
    pub any_of: Vec<String>,
    pub points: u32,
}

/// Scoring table for one framework
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkTable {
    /// Each phrase contributes at most `weight * cap_multiplier` regardless
    /// of how often it repeats
    #[serde(default = "default_cap_multiplier")]
    pub cap_multiplier: u32,

    /// Weighted indicator phrases matched against content
    pub indicators: Vec<Indicator>,

    /// Boosts keyed on substrings of the title alone
    #[serde(default)]
    pub title_boosts: Vec<Boost>,

    /// Boosts keyed on substrings of the content
    #[serde(default)]
    pub content_boosts: Vec<Boost>,
}

/// Framework scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Content shorter than this scores 0 (insufficient signal)
    #[serde(default = "default_min_content_chars")]
    pub min_content_chars: usize,

    #[serde(default = "default_ai_cybersecurity_table")]
    pub ai_cybersecurity: FrameworkTable,

    #[serde(default = "default_ai_ethics_table")]
    pub ai_ethics: FrameworkTable,

    #[serde(default = "default_quantum_cybersecurity_table")]
    pub quantum_cybersecurity: FrameworkTable,

    #[serde(default = "default_quantum_ethics_table")]
    pub quantum_ethics: FrameworkTable,
}

/// Internal paths configuration
#[derive(Debug, Clone, Default)]
pub struct PathsConfig {
    /// Base directory for guardian data
    pub base_dir: PathBuf,

    /// Path to config file
    pub config_file: PathBuf,

    /// Path to the learned-patterns SQLite database
    pub patterns_db_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            sanitize: SanitizeConfig::default(),
            classify: TopicIndicators::default(),
            scoring: ScoringConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_server_bind(),
            port: default_server_port(),
        }
    }
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            passes: default_sanitize_passes(),
        }
    }
}

impl Default for TopicIndicators {
    fn default() -> Self {
        Self {
            ai: default_ai_indicators(),
            quantum: default_quantum_indicators(),
            cybersecurity: default_cybersecurity_indicators(),
            cyber_ai: default_cyber_ai_indicators(),
            cyber_quantum: default_cyber_quantum_indicators(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_content_chars: default_min_content_chars(),
            ai_cybersecurity: default_ai_cybersecurity_table(),
            ai_ethics: default_ai_ethics_table(),
            quantum_cybersecurity: default_quantum_cybersecurity_table(),
            quantum_ethics: default_quantum_ethics_table(),
        }
    }
}

impl Config {
    /// Get the default base directory for guardian (~/.guardian)
    pub fn default_base_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".guardian")
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        Self::default_base_dir().join("config.toml")
    }

    /// Initialize paths configuration
    fn init_paths(&mut self, base_dir: Option<PathBuf>) {
        let base = base_dir.unwrap_or_else(Self::default_base_dir);
        self.paths = PathsConfig {
            config_file: base.join("config.toml"),
            patterns_db_file: base.join("patterns.db"),
            base_dir: base,
        };
    }

    /// Load configuration from a specific file path
    pub fn load(config_path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", config_path);

        if !config_path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        let content = std::fs::read_to_string(config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        let base = config_path.parent().unwrap_or(Path::new(".")).to_path_buf();
        config.paths = PathsConfig {
            config_file: config_path.to_path_buf(),
            patterns_db_file: base.join("patterns.db"),
            base_dir: base,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a base directory, falling back to defaults
    /// when no config file exists there
    pub fn load_from(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::default();
        config.init_paths(base_dir);

        if config.paths.config_file.exists() {
            debug!("Loading config from {:?}", config.paths.config_file);
            let content = std::fs::read_to_string(&config.paths.config_file)?;
            let mut loaded: Config = toml::from_str(&content)?;
            loaded.paths = config.paths;
            config = loaded;
            config.validate()?;
        } else {
            debug!("No config file found, using defaults");
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.paths.config_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&self.paths.config_file, content)?;
        info!("Saved config to {:?}", self.paths.config_file);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.sanitize.passes == 0 {
            return Err(Error::Config(
                "sanitize.passes must be at least 1".to_string(),
            ));
        }

        for (name, table) in [
            ("ai_cybersecurity", &self.scoring.ai_cybersecurity),
            ("ai_ethics", &self.scoring.ai_ethics),
            ("quantum_cybersecurity", &self.scoring.quantum_cybersecurity),
            ("quantum_ethics", &self.scoring.quantum_ethics),
        ] {
            if table.indicators.is_empty() {
                return Err(Error::Config(format!(
                    "scoring.{} must have at least one indicator",
                    name
                )));
            }
            if table.cap_multiplier == 0 {
                return Err(Error::Config(format!(
                    "scoring.{}.cap_multiplier must be at least 1",
                    name
                )));
            }
        }

        if self.classify.ai.is_empty() || self.classify.quantum.is_empty() {
            return Err(Error::Config(
                "classify.ai and classify.quantum must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Read the row-store connection string from the environment.
///
/// Absence is a fatal, user-visible error for every command that touches
/// the document store.
pub fn database_url() -> Result<String> {
    std::env::var("DATABASE_URL")
        .map_err(|_| Error::Config("DATABASE_URL environment variable not set".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 5002);
        assert_eq!(config.sanitize.passes, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_tables_nonempty() {
        let config = Config::default();
        assert!(!config.classify.ai.is_empty());
        assert!(!config.classify.quantum.is_empty());
        assert!(!config.scoring.ai_ethics.indicators.is_empty());
        assert_eq!(config.scoring.ai_ethics.cap_multiplier, 2);
        // The AI cybersecurity variant historically capped at 3x
        assert_eq!(config.scoring.ai_cybersecurity.cap_multiplier, 3);
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.init_paths(Some(tmp.path().to_path_buf()));
        config.server.port = 9999;

        config.save().unwrap();
        assert!(config.paths.config_file.exists());

        let loaded = Config::load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(loaded.server.port, 9999);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.sanitize.passes = 0;
        assert!(config.validate().is_err());
        config.sanitize.passes = 5;
        assert!(config.validate().is_ok());

        config.scoring.ai_ethics.indicators.clear();
        assert!(config.validate().is_err());
    }
}
