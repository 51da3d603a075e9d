// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here.
//
//   model.rs      — Embedding → stacked BiLSTM → per-timestep
//                   Linear classifier over the Latin vocabulary
//
//   trainer.rs    — Epoch loop: forward, cross-entropy over
//                   every timestep, backward, Adam step,
//                   validation, checkpoint per epoch
//
//   inferencer.rs — Rebuilds the model from its saved config,
//                   loads the newest checkpoint, and predicts
//                   one Latin index per input position
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Graves & Schmidhuber (2005) Bidirectional LSTM

/// BiLSTM transliteration model
pub mod model;

/// Training loop with validation and checkpointing
pub mod trainer;

/// Inference engine — loads checkpoint and predicts indices
pub mod inferencer;
