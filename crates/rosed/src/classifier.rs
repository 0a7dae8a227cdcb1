//! Two-layer feed-forward classifier over sentence embeddings.
//!
//! `Linear(embed_dim -> hidden) -> ReLU -> Linear(hidden -> 5)`.

use candle_core::{DType, Device, Module, Tensor, Var};
use candle_nn::Linear;
use rand::Rng;
use rose_common::Label;

/// Trainable parameters. Owned by the trainer until training finishes.
pub struct ClassifierParams {
    pub w1: Var,
    pub b1: Var,
    pub w2: Var,
    pub b2: Var,
}

impl ClassifierParams {
    /// Uniform init in `[-1/sqrt(fan_in), 1/sqrt(fan_in)]`, same as `nn.Linear`.
    pub fn init<R: Rng + ?Sized>(
        input_dim: usize,
        hidden_dim: usize,
        rng: &mut R,
        device: &Device,
    ) -> candle_core::Result<Self> {
        let (w1, b1) = init_linear(input_dim, hidden_dim, rng, device)?;
        let (w2, b2) = init_linear(hidden_dim, Label::COUNT, rng, device)?;
        Ok(Self { w1, b1, w2, b2 })
    }

    pub fn vars(&self) -> Vec<Var> {
        vec![
            self.w1.clone(),
            self.b1.clone(),
            self.w2.clone(),
            self.b2.clone(),
        ]
    }

    /// Logits `[n, 5]` for inputs `[n, input_dim]`, differentiable.
    pub fn forward(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        let hidden = x
            .broadcast_matmul(&self.w1.as_tensor().t()?)?
            .broadcast_add(self.b1.as_tensor())?
            .relu()?;
        hidden
            .broadcast_matmul(&self.w2.as_tensor().t()?)?
            .broadcast_add(self.b2.as_tensor())
    }

    /// Detach the weights into an immutable classifier.
    pub fn freeze(self) -> RoseClassifier {
        RoseClassifier {
            hidden: Linear::new(self.w1.as_detached_tensor(), Some(self.b1.as_detached_tensor())),
            output: Linear::new(self.w2.as_detached_tensor(), Some(self.b2.as_detached_tensor())),
        }
    }
}

fn init_linear<R: Rng + ?Sized>(
    fan_in: usize,
    fan_out: usize,
    rng: &mut R,
    device: &Device,
) -> candle_core::Result<(Var, Var)> {
    let bound = 1.0 / (fan_in as f32).sqrt();
    let weights: Vec<f32> = (0..fan_in * fan_out)
        .map(|_| rng.gen_range(-bound..bound))
        .collect();
    let bias: Vec<f32> = (0..fan_out).map(|_| rng.gen_range(-bound..bound)).collect();
    let w = Var::from_tensor(&Tensor::from_vec(weights, (fan_out, fan_in), device)?)?;
    let b = Var::from_tensor(&Tensor::from_vec(bias, fan_out, device)?)?;
    Ok((w, b))
}

/// Trained classifier. Immutable; safe to share across threads.
#[derive(Debug, Clone)]
pub struct RoseClassifier {
    hidden: Linear,
    output: Linear,
}

impl RoseClassifier {
    pub fn input_dim(&self) -> usize {
        self.hidden.weight().dim(1).unwrap_or(0)
    }

    /// Logits `[n, 5]`.
    pub fn logits(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        let h = self.hidden.forward(x)?.relu()?;
        self.output.forward(&h)
    }

    /// Top label for each row of `x`.
    pub fn predict(&self, x: &Tensor) -> candle_core::Result<Vec<Label>> {
        let rows = self.logits(x)?.to_dtype(DType::F32)?.to_vec2::<f32>()?;
        Ok(rows
            .iter()
            .map(|row| Label::argmax(row).unwrap_or(Label::TooFarAway))
            .collect())
    }
}
