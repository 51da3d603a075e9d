// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Persists the two character vocabularies as flat JSON maps:
//
//   <out_dir>/urdu_tokenizer.json   { "س": 1, "ل": 2, ... }
//   <out_dir>/latin_tokenizer.json  { "s": 1, "a": 2, ... }
//
// Inference must encode with exactly the mapping the model was
// trained on, so these files travel with the checkpoint.
//
// Loading goes through Vocabulary's Deserialize impl, which
// rejects multi-character keys and broken index ranges.
//
// Reference: Rust Book §9 (Error Handling with anyhow)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::data::vocabulary::Vocabulary;
use crate::domain::record::Side;

pub const SOURCE_VOCAB_FILE: &str = "urdu_tokenizer.json";
pub const TARGET_VOCAB_FILE: &str = "latin_tokenizer.json";

pub struct VocabularyStore {
    dir: PathBuf,
}

impl VocabularyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, side: Side) -> PathBuf {
        match side {
            Side::Source => self.dir.join(SOURCE_VOCAB_FILE),
            Side::Target => self.dir.join(TARGET_VOCAB_FILE),
        }
    }

    /// Write both vocabularies
    pub fn save(&self, source: &Vocabulary, target: &Vocabulary) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;
        self.save_side(Side::Source, source)?;
        self.save_side(Side::Target, target)?;
        Ok(())
    }

    /// Read both vocabularies back as (source, target)
    pub fn load(&self) -> Result<(Vocabulary, Vocabulary)> {
        Ok((self.load_side(Side::Source)?, self.load_side(Side::Target)?))
    }

    fn save_side(&self, side: Side, vocab: &Vocabulary) -> Result<()> {
        let path = self.path(side);
        fs::write(&path, serde_json::to_string(vocab)?)
            .with_context(|| format!("Cannot write {side} vocabulary to '{}'", path.display()))?;

        tracing::info!(
            "Saved {} vocabulary ({} characters) to '{}'",
            side,
            vocab.len(),
            path.display()
        );
        Ok(())
    }

    fn load_side(&self, side: Side) -> Result<Vocabulary> {
        let path = self.path(side);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read {side} vocabulary '{}'. Have you run 'train' first?",
                path.display()
            )
        })?;

        let vocab: Vocabulary = serde_json::from_str(&json)
            .with_context(|| format!("Invalid {side} vocabulary '{}'", path.display()))?;

        tracing::debug!("Loaded {} vocabulary: {} characters", side, vocab.len());
        Ok(vocab)
    }
}
