// ============================================================
// Layer 2 — TransliterateUseCase
// ============================================================
// Rewrites one Urdu string in Latin script with a trained model:
//
//   Step 1: Load both vocabularies          (Layer 6 - infra)
//   Step 2: Load model config + weights     (Layer 5 - ml)
//   Step 3: Encode text with source vocab   (Layer 4 - data)
//   Step 4: Predict one index per timestep  (Layer 5 - ml)
//   Step 5: Decode through target vocab     (Layer 4 - data)
//
// A character the source vocabulary has never seen is reported
// as UnknownCharacter rather than guessed at.
//
// Reference: Rust Book §10 (Traits)

use anyhow::{Context, Result};
use burn::prelude::Backend;
use std::path::Path;

use crate::data::vocabulary::Vocabulary;
use crate::domain::{record::Side, traits::TextTransliterator};
use crate::infra::{
    checkpoint::{CheckpointManager, MODEL_DIR},
    vocab_store::VocabularyStore,
};
use crate::ml::inferencer::Inferencer;

pub struct TransliterateUseCase<B: Backend = burn::backend::Wgpu> {
    source_vocab: Vocabulary,
    target_vocab: Vocabulary,
    inferencer:   Inferencer<B>,
}

impl TransliterateUseCase {
    /// Load vocabularies and the newest checkpoint from `out_dir`
    pub fn new(out_dir: impl AsRef<Path>) -> Result<Self> {
        let out_dir = out_dir.as_ref();

        let (source_vocab, target_vocab) = VocabularyStore::new(out_dir).load()?;
        let ckpt_manager = CheckpointManager::new(out_dir.join(MODEL_DIR))?;
        let inferencer   = Inferencer::from_checkpoint(&ckpt_manager)?;

        Ok(Self::from_parts(source_vocab, target_vocab, inferencer))
    }
}

impl<B: Backend> TransliterateUseCase<B> {
    pub fn from_parts(
        source_vocab: Vocabulary,
        target_vocab: Vocabulary,
        inferencer:   Inferencer<B>,
    ) -> Self {
        Self { source_vocab, target_vocab, inferencer }
    }
}

impl<B: Backend> TextTransliterator for TransliterateUseCase<B> {
    fn transliterate(&self, text: &str) -> Result<String> {
        let source_ids = self
            .source_vocab
            .encode(text)
            .map_err(|e| e.in_record(Side::Source, 0))?;

        let predicted = self.inferencer.predict(&source_ids)?;

        let latin = self
            .target_vocab
            .decode(&predicted)
            .context("Model predicted an index outside the target vocabulary")?;

        tracing::debug!("Transliterated {:?} → {:?}", text, latin);
        Ok(latin)
    }
}
