// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the filesystem on behalf of the
// other layers:
//
//   vocab_store.rs — urdu_tokenizer.json / latin_tokenizer.json
//                    save and validated load
//
//   checkpoint.rs  — Burn CompactRecorder weights, latest-epoch
//                    pointer, train/model config JSON
//
//   metrics.rs     — per-epoch CSV rows and the final
//                    history.json
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Character vocabulary persistence
pub mod vocab_store;

/// Training metrics CSV / history logger
pub mod metrics;
