//! Configuration types for the documind workspace.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for documind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumindConfig {
    /// Artifact locations.
    #[serde(default)]
    pub data: DataConfig,

    /// Collector configuration.
    #[serde(default)]
    pub collector: CollectorConfig,

    /// Embedding configuration.
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Search configuration.
    #[serde(default)]
    pub search: SearchConfig,

    /// QA generation configuration.
    #[serde(default)]
    pub qa: QaConfig,
}

/// Where collected and derived artifacts live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Base data directory.
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

impl DataConfig {
    /// Collected documents, one JSON array.
    pub fn documents_path(&self) -> PathBuf {
        self.dir.join("documents.json")
    }

    /// Flat embedding matrix.
    pub fn embeddings_path(&self) -> PathBuf {
        self.dir.join("embeddings.bin")
    }

    /// Document sidecar written next to the embeddings, same order.
    pub fn sidecar_path(&self) -> PathBuf {
        self.dir.join("documents_with_embeddings.json")
    }

    /// Generated QA dataset and its checkpoints.
    pub fn qa_dataset_path(&self) -> PathBuf {
        self.dir.join("qa_dataset.json")
    }
}

/// Dataset catalog collector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Catalog endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional cap on the number of records kept.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            limit: None,
        }
    }
}

/// Embedding model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Path to the ONNX model file.
    pub model_path: PathBuf,

    /// Path to the tokenizer.json file.
    pub tokenizer_path: PathBuf,

    /// Batch size for embedding.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Number of threads for CPU inference.
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        let model_dir = default_model_dir();
        Self {
            model_path: model_dir.join("model.onnx"),
            tokenizer_path: model_dir.join("tokenizer.json"),
            batch_size: 32,
            num_threads: 4,
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default number of results.
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Maximum number of results the front ends allow.
    #[serde(default = "default_max_top_k")]
    pub max_top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_top_k: 5,
            max_top_k: 10,
        }
    }
}

/// QA generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaConfig {
    /// Hosted model identifier.
    #[serde(default = "default_qa_model")]
    pub model: String,

    /// Maximum tokens per completion.
    #[serde(default = "default_qa_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_qa_temperature")]
    pub temperature: f32,

    /// Checkpoint the dataset every this many processed chunks.
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: usize,

    /// Word budget per chunk fed to the model.
    #[serde(default = "default_max_chunk_words")]
    pub max_chunk_words: usize,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            model: default_qa_model(),
            max_tokens: default_qa_max_tokens(),
            temperature: default_qa_temperature(),
            checkpoint_interval: default_checkpoint_interval(),
            max_chunk_words: default_max_chunk_words(),
            api_key_env: default_api_key_env(),
        }
    }
}

// Default value functions

fn default_api_url() -> String {
    "https://huggingface.co/api/datasets".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_batch_size() -> usize {
    32
}

fn default_num_threads() -> usize {
    4
}

fn default_top_k() -> usize {
    5
}

fn default_max_top_k() -> usize {
    10
}

fn default_qa_model() -> String {
    "claude-3-5-haiku-20241022".to_string()
}

fn default_qa_max_tokens() -> u32 {
    1024
}

fn default_qa_temperature() -> f32 {
    0.7
}

fn default_checkpoint_interval() -> usize {
    10
}

fn default_max_chunk_words() -> usize {
    200
}

fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("documind")
        .join("data")
}

fn default_model_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("documind")
        .join("models")
}

impl DocumindConfig {
    /// Load configuration from file.
    pub fn load(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            crate::error::DocumindError::config(format!("Failed to parse config: {}", e))
        })?;
        Ok(config)
    }

    /// Load configuration from default paths.
    pub fn load_default() -> crate::error::Result<Self> {
        // Try user config first
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("documind").join("config.toml");
            if user_config.exists() {
                return Self::load(&user_config);
            }
        }

        // Try local config
        let local_config = PathBuf::from("documind.toml");
        if local_config.exists() {
            return Self::load(&local_config);
        }

        // Return defaults
        Ok(Self::default())
    }
}
