//! Monitor configuration, loaded from TOML.

use std::path::{Path, PathBuf};

use sdb_types::Word;
use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, MonitorResult};

/// Top-level monitor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// REPL prompt.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Run to completion without a REPL.
    #[serde(default)]
    pub batch: bool,
    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Physical memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Watchpoint pool settings.
    #[serde(default)]
    pub watchpoints: WatchpointConfig,
}

/// Physical memory window of the target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Guest physical address of the first byte; also the reset `pc`.
    #[serde(default = "default_mem_base")]
    pub base: Word,
    /// Size in bytes.
    #[serde(default = "default_mem_size")]
    pub size: usize,
    /// Raw binary loaded at `base`.
    #[serde(default)]
    pub image: Option<PathBuf>,
}

/// Watchpoint pool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchpointConfig {
    /// Number of watchpoint slots.
    #[serde(default = "default_wp_capacity")]
    pub capacity: usize,
}

impl MonitorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> MonitorResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| MonitorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| MonitorError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            batch: false,
            log_level: default_log_level(),
            memory: MemoryConfig::default(),
            watchpoints: WatchpointConfig::default(),
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            base: default_mem_base(),
            size: default_mem_size(),
            image: None,
        }
    }
}

impl Default for WatchpointConfig {
    fn default() -> Self {
        Self {
            capacity: default_wp_capacity(),
        }
    }
}

fn default_prompt() -> String {
    "(sdb) ".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_mem_base() -> Word {
    0x8000_0000
}

fn default_mem_size() -> usize {
    0x0800_0000
}

fn default_wp_capacity() -> usize {
    sdb_watch::POOL_SIZE
}
