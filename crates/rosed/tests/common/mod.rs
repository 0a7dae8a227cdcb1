//! Shared test fixtures: a deterministic stand-in for the sentence encoder.
#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use candle_core::{Device, Tensor};
use rose_common::EMBED_DIM;
use rosed::embedder::{l2_normalize, Embedder, ModelError};

/// Bag-of-words hashed into a fixed number of buckets, L2 normalised.
pub struct HashingEmbedder {
    dim: usize,
    device: Device,
}

impl HashingEmbedder {
    pub fn new() -> Self {
        Self::with_dim(EMBED_DIM)
    }

    pub fn with_dim(dim: usize) -> Self {
        Self {
            dim,
            device: Device::Cpu,
        }
    }

    fn bucket(&self, word: &str) -> usize {
        let mut h = DefaultHasher::new();
        word.hash(&mut h);
        (h.finish() % self.dim as u64) as usize
    }
}

impl Embedder for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Tensor, ModelError> {
        let mut data = vec![0f32; texts.len() * self.dim];
        for (row, text) in texts.iter().enumerate() {
            let lowered = text.to_lowercase();
            for word in lowered.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
                data[row * self.dim + self.bucket(word)] += 1.0;
            }
        }
        let raw = Tensor::from_vec(data, (texts.len(), self.dim), &self.device)?;
        Ok(l2_normalize(&raw)?)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}
