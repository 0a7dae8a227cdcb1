//! BERT encoder forward pass for sentence embeddings.
//!
//! Covers the plain BERT layout used by the MiniLM sentence-transformers
//! exports: embeddings -> N x (self-attention, feed-forward) -> hidden
//! states. Pooling lives in the embedder.

use candle_core::{DType, Module, Result as CandleResult, Tensor};
use candle_nn::{embedding, layer_norm, linear, Embedding, LayerNorm, Linear, VarBuilder};
use serde::Deserialize;

/// BERT hyper-parameters read from `config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct BertConfig {
    pub vocab_size: usize,
    pub hidden_size: usize,
    pub num_hidden_layers: usize,
    pub num_attention_heads: usize,
    pub intermediate_size: usize,
    pub max_position_embeddings: usize,
    #[serde(default = "default_type_vocab_size")]
    pub type_vocab_size: usize,
    #[serde(default = "default_layer_norm_eps")]
    pub layer_norm_eps: f64,
    #[serde(default = "default_hidden_act")]
    pub hidden_act: String,
}

fn default_type_vocab_size() -> usize {
    2
}

fn default_layer_norm_eps() -> f64 {
    1e-12
}

fn default_hidden_act() -> String {
    "gelu".to_string()
}

impl BertConfig {
    pub fn head_dim(&self) -> usize {
        self.hidden_size / self.num_attention_heads
    }
}

struct BertEmbeddings {
    word: Embedding,
    position: Embedding,
    token_type: Embedding,
    norm: LayerNorm,
}

impl BertEmbeddings {
    fn load(vb: VarBuilder, cfg: &BertConfig) -> CandleResult<Self> {
        Ok(Self {
            word: embedding(cfg.vocab_size, cfg.hidden_size, vb.pp("word_embeddings"))?,
            position: embedding(
                cfg.max_position_embeddings,
                cfg.hidden_size,
                vb.pp("position_embeddings"),
            )?,
            token_type: embedding(cfg.type_vocab_size, cfg.hidden_size, vb.pp("token_type_embeddings"))?,
            norm: layer_norm(cfg.hidden_size, cfg.layer_norm_eps, vb.pp("LayerNorm"))?,
        })
    }

    fn forward(&self, input_ids: &Tensor, token_type_ids: &Tensor) -> CandleResult<Tensor> {
        let (_batch, seq_len) = input_ids.dims2()?;
        let positions = Tensor::arange(0u32, seq_len as u32, input_ids.device())?.unsqueeze(0)?;
        let words = self.word.forward(input_ids)?;
        let types = self.token_type.forward(token_type_ids)?;
        let positions = self.position.forward(&positions)?;
        let summed = (words + types)?.broadcast_add(&positions)?;
        self.norm.forward(&summed)
    }
}

struct SelfAttention {
    query: Linear,
    key: Linear,
    value: Linear,
    output: Linear,
    norm: LayerNorm,
    heads: usize,
    head_dim: usize,
}

impl SelfAttention {
    fn load(vb: VarBuilder, cfg: &BertConfig) -> CandleResult<Self> {
        let h = cfg.hidden_size;
        let inner = vb.pp("self");
        let out = vb.pp("output");
        Ok(Self {
            query: linear(h, h, inner.pp("query"))?,
            key: linear(h, h, inner.pp("key"))?,
            value: linear(h, h, inner.pp("value"))?,
            output: linear(h, h, out.pp("dense"))?,
            norm: layer_norm(h, cfg.layer_norm_eps, out.pp("LayerNorm"))?,
            heads: cfg.num_attention_heads,
            head_dim: cfg.head_dim(),
        })
    }

    fn split_heads(&self, x: &Tensor) -> CandleResult<Tensor> {
        let (b, s, _) = x.dims3()?;
        x.reshape((b, s, self.heads, self.head_dim))?
            .transpose(1, 2)?
            .contiguous()
    }

    fn forward(&self, hidden: &Tensor, mask: &Tensor) -> CandleResult<Tensor> {
        let (b, s, h) = hidden.dims3()?;
        let q = self.split_heads(&self.query.forward(hidden)?)?;
        let k = self.split_heads(&self.key.forward(hidden)?)?;
        let v = self.split_heads(&self.value.forward(hidden)?)?;

        let scale = 1.0 / (self.head_dim as f64).sqrt();
        let scores = (q.matmul(&k.t()?)? * scale)?.broadcast_add(mask)?;
        let probs = candle_nn::ops::softmax_last_dim(&scores)?;
        let context = probs
            .matmul(&v)?
            .transpose(1, 2)?
            .contiguous()?
            .reshape((b, s, h))?;

        let projected = self.output.forward(&context)?;
        self.norm.forward(&(projected + hidden)?)
    }
}

struct FeedForward {
    intermediate: Linear,
    output: Linear,
    norm: LayerNorm,
    exact_gelu: bool,
}

impl FeedForward {
    fn load(vb: VarBuilder, cfg: &BertConfig) -> CandleResult<Self> {
        let out = vb.pp("output");
        Ok(Self {
            intermediate: linear(
                cfg.hidden_size,
                cfg.intermediate_size,
                vb.pp("intermediate").pp("dense"),
            )?,
            output: linear(cfg.intermediate_size, cfg.hidden_size, out.pp("dense"))?,
            norm: layer_norm(cfg.hidden_size, cfg.layer_norm_eps, out.pp("LayerNorm"))?,
            exact_gelu: cfg.hidden_act != "gelu_new" && cfg.hidden_act != "gelu_pytorch_tanh",
        })
    }

    fn forward(&self, hidden: &Tensor) -> CandleResult<Tensor> {
        let x = self.intermediate.forward(hidden)?;
        let x = if self.exact_gelu { x.gelu_erf()? } else { x.gelu()? };
        let x = self.output.forward(&x)?;
        self.norm.forward(&(x + hidden)?)
    }
}

struct EncoderLayer {
    attention: SelfAttention,
    ffn: FeedForward,
}

/// Loaded BERT encoder.
pub struct BertEncoder {
    embeddings: BertEmbeddings,
    layers: Vec<EncoderLayer>,
    config: BertConfig,
}

impl BertEncoder {
    /// Build from a VarBuilder rooted at the safetensors file.
    ///
    /// Accepts both bare (`embeddings.*`) and prefixed (`bert.embeddings.*`)
    /// weight names.
    pub fn load(vb: VarBuilder, config: BertConfig) -> CandleResult<Self> {
        let vb = if vb.contains_tensor("embeddings.word_embeddings.weight") {
            vb
        } else {
            vb.pp("bert")
        };

        let embeddings = BertEmbeddings::load(vb.pp("embeddings"), &config)?;
        let encoder = vb.pp("encoder").pp("layer");
        let mut layers = Vec::with_capacity(config.num_hidden_layers);
        for i in 0..config.num_hidden_layers {
            let layer_vb = encoder.pp(i.to_string());
            layers.push(EncoderLayer {
                attention: SelfAttention::load(layer_vb.pp("attention"), &config)?,
                ffn: FeedForward::load(layer_vb, &config)?,
            });
        }

        Ok(Self {
            embeddings,
            layers,
            config,
        })
    }

    pub fn config(&self) -> &BertConfig {
        &self.config
    }

    /// Last hidden states, shape `[batch, seq, hidden]`.
    ///
    /// `attention_mask` is `[batch, seq]` with 1 for real tokens, 0 for padding.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> CandleResult<Tensor> {
        // 1 -> 0.0, 0 -> -10000.0, shaped [batch, 1, 1, seq] for broadcasting over heads
        let mask = attention_mask
            .to_dtype(DType::F32)?
            .affine(10000.0, -10000.0)?
            .unsqueeze(1)?
            .unsqueeze(1)?;

        let mut hidden = self.embeddings.forward(input_ids, token_type_ids)?;
        for layer in &self.layers {
            hidden = layer.attention.forward(&hidden, &mask)?;
            hidden = layer.ffn.forward(&hidden)?;
        }
        Ok(hidden)
    }
}
