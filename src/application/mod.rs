// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: these use cases call into the
// data, ml and infra layers in order and pass results along.
//
// Rules for this layer:
//   - No model math here
//   - No printing of results (that's Layer 1)
//   - No direct file formats (Layers 4 and 6 own those)
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// Inference over the saved vocabularies and checkpoint
pub mod transliterate_use_case;
