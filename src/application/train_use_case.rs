// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the JSON corpus           (Layer 4 - data)
//   Step 2: Build vocabularies, encode,
//           and pad both sides             (Layer 4 - data)
//   Step 3: Save both vocabularies         (Layer 6 - infra)
//   Step 4: Align widths into samples      (Layer 4 - data)
//   Step 5: Split train/validation         (Layer 4 - data)
//   Step 6: Save train + model config      (Layer 6 - infra)
//   Step 7: Run training loop              (Layer 5 - ml)
//   Step 8: Save training history          (Layer 6 - infra)
//
// Each step receives the previous step's output as an explicit
// argument; nothing is shared through globals.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    dataset::{align_samples, TransliterationDataset, TransliterationSample},
    loader::{JsonCorpusLoader, DEFAULT_SOURCE_FIELD, DEFAULT_TARGET_FIELD},
    preprocessor::{PreprocessOutput, Preprocessor},
    splitter::split_train_val,
};
use crate::domain::{record::Record, traits::RecordSource};
use crate::infra::{
    checkpoint::{CheckpointManager, MODEL_DIR},
    metrics::{MetricsLogger, TrainingHistory},
    vocab_store::VocabularyStore,
};
use crate::ml::{model::TransliteratorConfig, trainer::run_training};

// ─── Training Configuration ──────────────────────────────────────────────────
// All settings for one training run. Serialisable so the run
// can be recorded next to its checkpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub corpus:           PathBuf,
    pub out_dir:          PathBuf,
    pub source_field:     String,
    pub target_field:     String,
    pub epochs:           usize,
    pub batch_size:       usize,
    pub validation_split: f64,
    pub lr:               f64,
    pub embedding_dim:    usize,
    pub hidden_size:      usize,
    pub num_layers:       usize,
    pub seed:             u64,
    /// Encode against the vocabulary files already in out_dir
    pub reuse_vocab:      bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            corpus:           PathBuf::from("your_data.json"),
            out_dir:          PathBuf::from("."),
            source_field:     DEFAULT_SOURCE_FIELD.to_string(),
            target_field:     DEFAULT_TARGET_FIELD.to_string(),
            epochs:           50,
            batch_size:       32,
            validation_split: 0.2,
            lr:               1e-3,
            embedding_dim:    64,
            hidden_size:      64,
            num_layers:       2,
            seed:             42,
            reuse_vocab:      false,
        }
    }
}

impl TrainConfig {
    /// Reject settings the training loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.validation_split) {
            bail!("validation_split must be in [0, 1), got {}", self.validation_split);
        }
        if self.epochs == 0 || self.batch_size == 0 {
            bail!("epochs and batch_size must be positive");
        }
        if self.embedding_dim == 0 || self.hidden_size == 0 || self.num_layers == 0 {
            bail!("embedding_dim, hidden_size and num_layers must be positive");
        }
        if !(self.lr > 0.0) {
            bail!("lr must be positive, got {}", self.lr);
        }
        Ok(())
    }

    pub fn model_dir(&self) -> PathBuf {
        self.out_dir.join(MODEL_DIR)
    }
}

/// Everything derived from the corpus before any tensor exists.
#[derive(Debug)]
pub struct PreparedCorpus {
    pub output:    PreprocessOutput,
    pub model_cfg: TransliteratorConfig,
    pub samples:   Vec<TransliterationSample>,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainingHistory> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load records ──────────────────────────────────────────────
        let loader  = JsonCorpusLoader::new(&cfg.corpus)
            .with_fields(&cfg.source_field, &cfg.target_field);
        let records = loader.load_all()?;

        // ── Steps 2–4: Preprocess, persist vocabularies, align ───────────────
        let vocab_store = VocabularyStore::new(&cfg.out_dir);
        let prepared    = self.prepare(&records, &vocab_store)?;
        vocab_store.save(&prepared.output.source_vocab, &prepared.output.target_vocab)?;
        if prepared.model_cfg.sequence_width == 0 {
            bail!("every text in '{}' is empty; nothing to train on", cfg.corpus.display());
        }

        // ── Step 5: Train / validation split ──────────────────────────────────
        let (train_samples, val_samples) =
            split_train_val(prepared.samples, cfg.validation_split);
        tracing::info!(
            "Split: {} train, {} validation",
            train_samples.len(),
            val_samples.len()
        );
        if train_samples.is_empty() {
            bail!("validation_split {} leaves no training records", cfg.validation_split);
        }

        let train_dataset = TransliterationDataset::new(train_samples);
        let val_dataset   = TransliterationDataset::new(val_samples);

        // ── Step 6: Save configs for inference ────────────────────────────────
        let ckpt_manager = CheckpointManager::new(cfg.model_dir())?;
        ckpt_manager.save_train_config(cfg)?;
        ckpt_manager.save_model_config(&prepared.model_cfg)?;

        // ── Step 7: Run training loop (Layer 5) ───────────────────────────────
        let metrics = MetricsLogger::new(cfg.model_dir())?;
        let history = run_training(
            cfg,
            &prepared.model_cfg,
            train_dataset,
            val_dataset,
            &ckpt_manager,
            &metrics,
        )?;

        // ── Step 8: Save history ──────────────────────────────────────────────
        let path = metrics.save_history(&history)?;
        println!("{}", serde_json::to_string(&history)?);
        tracing::info!("Saved training history to '{}'", path.display());

        Ok(history)
    }

    /// Preprocess the records and derive the model configuration.
    /// With `reuse_vocab` the existing vocabulary files are loaded;
    /// a missing file or any unseen character fails the run.
    pub fn prepare(&self, records: &[Record], vocab_store: &VocabularyStore) -> Result<PreparedCorpus> {
        let cfg          = &self.config;
        let preprocessor = Preprocessor::new();

        let result = if cfg.reuse_vocab {
            tracing::info!("Reusing vocabularies from '{}'", cfg.out_dir.display());
            let (source_vocab, target_vocab) = vocab_store.load()?;
            preprocessor.encode_with(records, &source_vocab, &target_vocab)
        } else {
            preprocessor.run(records)
        };
        let output = result.context("Preprocessing failed")?;

        tracing::info!(
            "Vocabularies: {} source, {} target (incl. padding)",
            output.source_vocab_size(),
            output.target_vocab_size()
        );

        let (width, samples) = align_samples(&output.source_matrix, &output.target_matrix)?;
        tracing::info!(
            "Padded widths: source {}, target {}, shared {}",
            output.source_matrix.width(),
            output.target_matrix.width(),
            width
        );

        let model_cfg = TransliteratorConfig::new(
            output.source_vocab_size(),
            output.target_vocab_size(),
            width,
        )
        .with_embedding_dim(cfg.embedding_dim)
        .with_hidden_size(cfg.hidden_size)
        .with_num_layers(cfg.num_layers);

        Ok(PreparedCorpus { output, model_cfg, samples })
    }
}
