// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw JSON corpus to tensor batches.
//
//   corpus.json
//       │
//       ▼
//   JsonCorpusLoader   → Vec<Record>, order preserved
//       │
//       ▼
//   Preprocessor       → two Vocabulary maps + two PaddedMatrix
//       │
//       ▼
//   align_samples      → widen both sides to a shared width
//       │
//       ▼
//   split_train_val    → seeded 80/20 split
//       │
//       ▼
//   TransliterationDataset / TransliterationBatcher
//       │
//       ▼
//   DataLoader         → feeds batches to the training loop
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads the (urdu, latin) JSON corpus
pub mod loader;

/// Character ↔ index mapping with a reserved padding index
pub mod vocabulary;

/// Rectangular end-padded index table
pub mod padded;

/// Builds vocabularies, encodes and pads both sides
pub mod preprocessor;

/// Implements Burn's Dataset trait for aligned samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/validation sets
pub mod splitter;
