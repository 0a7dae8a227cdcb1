//! Configuration management for rosed.
//!
//! Loads settings from /etc/rosed/config.toml or uses defaults.
//! `CORS_ORIGINS` in the environment overrides `server.cors_origins`.

use anyhow::{Context, Result};
use rose_common::corpus::DEFAULT_CORPUS_SIZE;
use rose_common::EMBED_DIM;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/rosed/config.toml";

/// Environment variable overriding the allowed CORS origins
pub const CORS_ENV: &str = "CORS_ORIGINS";

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Comma-separated allowed origins, or "*"
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_bind() -> String {
    "0.0.0.0:8001".to_string()
}

fn default_cors_origins() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Allowed CORS origins as configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `*` appeared in the list.
    Any,
    /// Exactly these origins. May be empty, which allows none.
    List(Vec<String>),
}

impl ServerConfig {
    /// Parsed origin list. Only a literal `*` allows any origin.
    pub fn origins(&self) -> CorsOrigins {
        let origins: Vec<String> = self
            .cors_origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if origins.iter().any(|o| o == "*") {
            CorsOrigins::Any
        } else {
            CorsOrigins::List(origins)
        }
    }
}

// ============================================================================
// Embedding Model
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Directory holding config.json, tokenizer.json and model.safetensors
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// Expected embedding width; checked against the loaded model
    #[serde(default = "default_embed_dim")]
    pub embed_dim: usize,

    /// Tokens kept per input before truncation
    #[serde(default = "default_max_sequence_length")]
    pub max_sequence_length: usize,

    /// Texts encoded per forward pass
    #[serde(default = "default_encode_batch_size")]
    pub encode_batch_size: usize,
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("/var/lib/rosed/models/all-MiniLM-L6-v2")
}

fn default_embed_dim() -> usize {
    EMBED_DIM
}

fn default_max_sequence_length() -> usize {
    128
}

fn default_encode_batch_size() -> usize {
    64
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: default_model_dir(),
            embed_dim: default_embed_dim(),
            max_sequence_length: default_max_sequence_length(),
            encode_batch_size: default_encode_batch_size(),
        }
    }
}

// ============================================================================
// Training
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Examples kept after shuffling the synthesized corpus
    #[serde(default = "default_corpus_size")]
    pub corpus_size: usize,

    /// Width of the classifier's hidden layer
    #[serde(default = "default_hidden_dim")]
    pub hidden_dim: usize,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_epochs")]
    pub epochs: usize,

    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// Fixed seed for corpus shuffling, weight init and batching.
    /// Unset means fresh entropy on every start.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_corpus_size() -> usize {
    DEFAULT_CORPUS_SIZE
}

fn default_hidden_dim() -> usize {
    256
}

fn default_batch_size() -> usize {
    64
}

fn default_epochs() -> usize {
    20
}

fn default_learning_rate() -> f64 {
    1e-3
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            corpus_size: default_corpus_size(),
            hidden_dim: default_hidden_dim(),
            batch_size: default_batch_size(),
            epochs: default_epochs(),
            learning_rate: default_learning_rate(),
            seed: None,
        }
    }
}

// ============================================================================
// Top-level
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub training: TrainingConfig,
}

impl Config {
    /// Load config from the given path (or the default path), falling back
    /// to defaults when the file is missing or unreadable.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.unwrap_or_else(|| Path::new(CONFIG_PATH));
        let mut config = Self::load_from_path(path).unwrap_or_else(|e| {
            warn!("[BOOT] Config not loaded from {}, using defaults: {:#}", path.display(), e);
            Config::default()
        });
        config.apply_env();
        config
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        info!("[BOOT] Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(origins) = std::env::var(CORS_ENV) {
            if !origins.trim().is_empty() {
                self.server.cors_origins = origins;
            }
        }
    }
}
