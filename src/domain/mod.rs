// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types that describe the transliteration problem:
//
//   record.rs — one (Urdu, Latin) training pair and the
//               Side enum naming either half of it
//   error.rs  — typed errors raised while turning records
//               into vocabularies and padded matrices
//   traits.rs — abstractions the outer layers implement
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O
//   - Only structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// A parallel (source, target) text pair
pub mod record;

// PreprocessError and friends
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
