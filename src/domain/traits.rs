// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer talks to these traits rather than to
// concrete loaders or model wrappers, so a CSV corpus or a
// different inference backend can slot in without touching
// the use cases.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::record::Record;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Anything that can produce the ordered list of training records.
///
/// Implementations:
///   - JsonCorpusLoader → reads a JSON array of objects
pub trait RecordSource {
    /// Load every record, preserving corpus order.
    fn load_all(&self) -> Result<Vec<Record>>;
}

// ─── TextTransliterator ───────────────────────────────────────────────────────
/// Anything that can rewrite source-script text in the target script.
///
/// Implementations:
///   - TransliterateUseCase → runs the trained BiLSTM model
pub trait TextTransliterator {
    fn transliterate(&self, text: &str) -> Result<String>;
}
