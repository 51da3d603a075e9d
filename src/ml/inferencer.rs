// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::Result;
use burn::prelude::*;

use crate::data::vocabulary::PAD_INDEX;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{TransliteratorConfig, TransliteratorModel};

type InferBackend = burn::backend::Wgpu;

pub struct Inferencer<B: Backend = InferBackend> {
    model:          TransliteratorModel<B>,
    sequence_width: usize,
    device:         B::Device,
}

impl Inferencer<InferBackend> {
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Self> {
        let device    = burn::backend::wgpu::WgpuDevice::default();
        let model_cfg = ckpt_manager.load_model_config()?;
        let model: TransliteratorModel<InferBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");
        Ok(Self::new(model, &model_cfg, device))
    }
}

impl<B: Backend> Inferencer<B> {
    pub fn new(model: TransliteratorModel<B>, cfg: &TransliteratorConfig, device: B::Device) -> Self {
        Self { model, sequence_width: cfg.sequence_width, device }
    }

    /// Predict one target index per timestep for an encoded source
    /// sequence. Input is end-padded to the trained width so words
    /// whose transliteration is longer than the source still fit.
    /// Trailing padding predictions are trimmed; a PAD inside the
    /// word is kept so decoding can reject it.
    pub fn predict(&self, source_ids: &[u32]) -> Result<Vec<u32>> {
        let seq_len = source_ids.len().max(self.sequence_width);
        if seq_len == 0 {
            return Ok(Vec::new());
        }

        let mut input: Vec<i32> = source_ids.iter().map(|&x| x as i32).collect();
        input.resize(seq_len, PAD_INDEX as i32);

        let input_tensor = Tensor::<B, 1, Int>::from_ints(input.as_slice(), &self.device)
            .reshape([1, seq_len]);

        let logits    = self.model.forward(input_tensor); // [1, seq_len, classes]
        let predicted = logits.argmax(2).reshape([seq_len]);

        let ids: Vec<i64> = predicted
            .into_data()
            .convert::<i64>()
            .to_vec::<i64>()
            .map_err(|e| anyhow::anyhow!("Cannot read predictions: {e:?}"))?;

        let ids = trim_trailing_padding(ids.into_iter().map(|x| x as u32).collect());

        tracing::debug!("Predicted {} target characters from {} inputs", ids.len(), source_ids.len());
        Ok(ids)
    }
}

/// Drop the PAD run after the last real character.
fn trim_trailing_padding(mut ids: Vec<u32>) -> Vec<u32> {
    while ids.last() == Some(&PAD_INDEX) {
        ids.pop();
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_predictions_are_valid_target_indices() {
        let device = Default::default();
        let cfg = TransliteratorConfig::new(5, 4, 6)
            .with_embedding_dim(4)
            .with_hidden_size(3)
            .with_num_layers(1);
        let model: TransliteratorModel<NdArray> = cfg.init(&device);
        let inferencer = Inferencer::new(model, &cfg, device);

        let ids = inferencer.predict(&[1, 2, 3]).unwrap();
        assert!(ids.len() <= 6);
        assert!(ids.iter().all(|&x| x < 4));
        assert_ne!(ids.last(), Some(&PAD_INDEX));
    }

    #[test]
    fn test_trims_only_trailing_padding() {
        assert_eq!(trim_trailing_padding(vec![3, 0, 2, 0, 0]), vec![3, 0, 2]);
        assert_eq!(trim_trailing_padding(vec![0, 0]), Vec::<u32>::new());
        assert_eq!(trim_trailing_padding(vec![1, 2]), vec![1, 2]);
    }

    #[test]
    fn test_empty_input_with_zero_width_predicts_nothing() {
        let device = Default::default();
        let cfg = TransliteratorConfig::new(2, 2, 0)
            .with_embedding_dim(2)
            .with_hidden_size(2)
            .with_num_layers(1);
        let model: TransliteratorModel<NdArray> = cfg.init(&device);
        let inferencer = Inferencer::new(model, &cfg, device);
        assert!(inferencer.predict(&[]).unwrap().is_empty());
    }
}
