//! Sentence embedding provider.
//!
//! `MiniLmEmbedder` loads a sentence-transformers BERT export from a local
//! directory (config.json, tokenizer.json, model.safetensors) and produces
//! mean-pooled, L2-normalised sentence vectors. Loading happens once, in the
//! startup training task; afterwards the embedder is only read.

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};
use tracing::{debug, info};

use crate::bert::{BertConfig, BertEncoder};
use crate::config::ModelConfig;

/// Error type for model loading and encoding.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model directory not found: {path}")]
    ModelDirectoryNotFound { path: String },

    #[error("Required model file missing: {path}")]
    MissingFile { path: String },

    #[error("Config parse error for {path}: {message}")]
    ConfigParse { path: String, message: String },

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("Embedding dimension mismatch: expected {expected}, model produces {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Training corpus is empty")]
    EmptyCorpus,

    #[error("Tensor operation failed: {0}")]
    Tensor(#[from] candle_core::Error),
}

/// Text to fixed-width vectors.
pub trait Embedder: Send + Sync {
    /// Width of every produced vector.
    fn dimension(&self) -> usize;

    /// Encode a batch of texts into a `[n, dimension]` F32 tensor.
    fn embed_batch(&self, texts: &[&str]) -> Result<Tensor, ModelError>;

    /// Encode one text into a `[1, dimension]` tensor.
    fn embed(&self, text: &str) -> Result<Tensor, ModelError> {
        self.embed_batch(&[text])
    }

    /// Device the produced tensors live on.
    fn device(&self) -> &Device;
}

/// all-MiniLM-L6-v2 (or any plain BERT sentence-transformers export).
pub struct MiniLmEmbedder {
    encoder: BertEncoder,
    tokenizer: Tokenizer,
    device: Device,
    batch_size: usize,
}

impl MiniLmEmbedder {
    pub fn load(cfg: &ModelConfig) -> Result<Self, ModelError> {
        let dir = cfg.model_dir.as_path();
        if !dir.is_dir() {
            return Err(ModelError::ModelDirectoryNotFound {
                path: dir.display().to_string(),
            });
        }

        let config_path = required_file(dir, "config.json")?;
        let tokenizer_path = required_file(dir, "tokenizer.json")?;
        let weights_path = required_file(dir, "model.safetensors")?;

        let raw = fs::read_to_string(&config_path).map_err(|e| ModelError::ConfigParse {
            path: config_path.display().to_string(),
            message: e.to_string(),
        })?;
        let bert_config: BertConfig =
            serde_json::from_str(&raw).map_err(|e| ModelError::ConfigParse {
                path: config_path.display().to_string(),
                message: e.to_string(),
            })?;

        if bert_config.hidden_size != cfg.embed_dim {
            return Err(ModelError::DimensionMismatch {
                expected: cfg.embed_dim,
                actual: bert_config.hidden_size,
            });
        }

        let mut tokenizer =
            Tokenizer::from_file(&tokenizer_path).map_err(|e| ModelError::Tokenizer(e.to_string()))?;
        let max_length = cfg
            .max_sequence_length
            .min(bert_config.max_position_embeddings);
        tokenizer
            .with_padding(Some(PaddingParams {
                strategy: PaddingStrategy::BatchLongest,
                ..Default::default()
            }))
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;

        let device = Device::Cpu;
        info!(
            "[ML] Loading encoder weights from {} ({} layers, dim {})",
            weights_path.display(),
            bert_config.num_hidden_layers,
            bert_config.hidden_size
        );
        // SAFETY: the safetensors file is opened read-only and not modified while mapped.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[&weights_path], DType::F32, &device)? };
        let encoder = BertEncoder::load(vb, bert_config)?;

        Ok(Self {
            encoder,
            tokenizer,
            device,
            batch_size: cfg.encode_batch_size.max(1),
        })
    }

    fn encode_chunk(&self, texts: &[&str]) -> Result<Tensor, ModelError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;

        let n = encodings.len();
        let seq_len = encodings.first().map(|e| e.get_ids().len()).unwrap_or(0);
        let mut ids = Vec::with_capacity(n * seq_len);
        let mut types = Vec::with_capacity(n * seq_len);
        let mut mask = Vec::with_capacity(n * seq_len);
        for enc in &encodings {
            ids.extend_from_slice(enc.get_ids());
            types.extend_from_slice(enc.get_type_ids());
            mask.extend_from_slice(enc.get_attention_mask());
        }

        let input_ids = Tensor::from_vec(ids, (n, seq_len), &self.device)?;
        let token_type_ids = Tensor::from_vec(types, (n, seq_len), &self.device)?;
        let attention_mask = Tensor::from_vec(mask, (n, seq_len), &self.device)?;

        let hidden = self
            .encoder
            .forward(&input_ids, &token_type_ids, &attention_mask)?;
        let pooled = mean_pool(&hidden, &attention_mask)?;
        Ok(l2_normalize(&pooled)?)
    }
}

impl Embedder for MiniLmEmbedder {
    fn dimension(&self) -> usize {
        self.encoder.config().hidden_size
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Tensor, ModelError> {
        if texts.is_empty() {
            return Ok(Tensor::zeros((0, self.dimension()), DType::F32, &self.device)?);
        }
        let mut chunks = Vec::with_capacity(texts.len().div_ceil(self.batch_size));
        for chunk in texts.chunks(self.batch_size) {
            chunks.push(self.encode_chunk(chunk)?);
        }
        debug!("[ML] Encoded {} texts in {} chunks", texts.len(), chunks.len());
        Ok(Tensor::cat(&chunks, 0)?)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

fn required_file(dir: &Path, name: &str) -> Result<PathBuf, ModelError> {
    let path = dir.join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ModelError::MissingFile {
            path: path.display().to_string(),
        })
    }
}

/// Average token vectors over real (unpadded) tokens. `[b, s, h]` -> `[b, h]`.
pub fn mean_pool(hidden: &Tensor, attention_mask: &Tensor) -> candle_core::Result<Tensor> {
    let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
    let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
    let counts = (mask.sum(1)? + 1e-9)?;
    summed.broadcast_div(&counts)
}

/// Scale each row to unit length. Zero rows stay zero.
pub fn l2_normalize(x: &Tensor) -> candle_core::Result<Tensor> {
    let norms = (x.sqr()?.sum_keepdim(1)?.sqrt()? + 1e-12)?;
    x.broadcast_div(&norms)
}
