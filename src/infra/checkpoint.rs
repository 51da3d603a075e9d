// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder.
//
// File layout under <out_dir>/model/:
//     model_epoch_1.mpk.gz   ← weights after epoch 1
//     model_epoch_2.mpk.gz   ← weights after epoch 2
//     ...
//     latest_epoch.json      ← number of the newest checkpoint
//     train_config.json      ← the run's TrainConfig
//     model_config.json      ← vocab sizes, width, layer dims
//
// model_config.json is what lets inference rebuild an identical
// architecture before loading weights into it: the vocabulary
// sizes come from the corpus, not from the command line.
//
// CompactRecorder writes half-precision MessagePack + gzip and
// refuses to load into a mismatched architecture.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::{TransliteratorConfig, TransliteratorModel};

pub const MODEL_DIR: &str = "model";

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager rooted at `dir`.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create checkpoint dir '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Save model weights for a given epoch and move the
    /// latest-epoch pointer to it.
    pub fn save_model<B: Backend>(
        &self,
        model: &TransliteratorModel<B>,
        epoch: usize,
    ) -> Result<()> {
        // Recorder appends the .mpk.gz extension
        let path = self.dir.join(format!("model_epoch_{epoch}"));

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save checkpoint to '{}'", path.display())
            })?;

        let latest_path = self.dir.join("latest_epoch.json");
        fs::write(&latest_path, serde_json::to_string(&epoch)?)
            .with_context(|| "Failed to write latest_epoch.json")?;

        tracing::debug!("Saved checkpoint: epoch {}", epoch);
        Ok(())
    }

    /// Load the newest checkpoint into `model`, which must have the
    /// same architecture the checkpoint was saved from.
    pub fn load_model<B: Backend>(
        &self,
        model:  TransliteratorModel<B>,
        device: &B::Device,
    ) -> Result<TransliteratorModel<B>> {
        let epoch = self.latest_epoch()?;
        let path  = self.dir.join(format!("model_epoch_{epoch}"));

        tracing::info!("Loading checkpoint from epoch {}", epoch);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display())
            })?;

        Ok(model.load_record(record))
    }

    pub fn save_train_config(&self, cfg: &TrainConfig) -> Result<()> {
        self.write_json("train_config.json", cfg)
    }

    #[cfg(test)]
    pub fn load_train_config(&self) -> Result<TrainConfig> {
        self.read_json("train_config.json")
    }

    pub fn save_model_config(&self, cfg: &TransliteratorConfig) -> Result<()> {
        self.write_json("model_config.json", cfg)
    }

    pub fn load_model_config(&self) -> Result<TransliteratorConfig> {
        self.read_json("model_config.json")
    }

    /// Read latest_epoch.json and return the epoch number.
    pub fn latest_epoch(&self) -> Result<usize> {
        let path = self.dir.join("latest_epoch.json");

        let s = fs::read_to_string(&path)
            .with_context(|| {
                format!("Cannot find '{}'. Have you run 'train' first?", path.display())
            })?;

        Ok(serde_json::from_str::<usize>(&s)?)
    }

    fn write_json<T: serde::Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, serde_json::to_string_pretty(value)?)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Saved '{}'", path.display());
        Ok(())
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read '{}'. Make sure you have run 'train' first.",
                    path.display()
                )
            })?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid JSON in '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn tiny_config() -> TransliteratorConfig {
        TransliteratorConfig::new(5, 4, 3)
            .with_embedding_dim(4)
            .with_hidden_size(2)
            .with_num_layers(1)
    }

    #[test]
    fn test_model_round_trip_through_latest_epoch() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path().join(MODEL_DIR)).unwrap();
        let device = Default::default();

        let model: TransliteratorModel<TestBackend> = tiny_config().init(&device);
        ckpt.save_model(&model, 1).unwrap();
        ckpt.save_model(&model, 2).unwrap();
        assert_eq!(ckpt.latest_epoch().unwrap(), 2);

        let fresh: TransliteratorModel<TestBackend> = tiny_config().init(&device);
        let loaded = ckpt.load_model(fresh, &device).unwrap();

        let input = Tensor::<TestBackend, 1, Int>::from_ints([1, 2, 0], &device).reshape([1, 3]);
        assert_eq!(loaded.forward(input).dims(), [1, 3, 4]);
    }

    #[test]
    fn test_model_config_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path()).unwrap();

        ckpt.save_model_config(&tiny_config()).unwrap();
        let back = ckpt.load_model_config().unwrap();
        assert_eq!(back.source_vocab_size, 5);
        assert_eq!(back.target_vocab_size, 4);
        assert_eq!(back.sequence_width, 3);
        assert_eq!(back.hidden_size, 2);
    }

    #[test]
    fn test_train_config_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path()).unwrap();

        let cfg = TrainConfig { epochs: 3, ..TrainConfig::default() };
        ckpt.save_train_config(&cfg).unwrap();
        assert_eq!(ckpt.load_train_config().unwrap().epochs, 3);
    }

    #[test]
    fn test_missing_checkpoint_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path()).unwrap();
        assert!(ckpt.latest_epoch().is_err());
        assert!(ckpt.load_model_config().is_err());
    }
}
