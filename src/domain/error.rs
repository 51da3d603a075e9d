// ============================================================
// Layer 3 — Preprocessing Errors
// ============================================================
// Everything that can go wrong between "a list of records"
// and "two padded integer matrices" gets its own variant, so
// callers can match on the failure instead of parsing strings.
//
// Outer layers wrap these in anyhow::Error with context;
// thiserror gives us Display + std::error::Error for free.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)

use thiserror::Error;

use crate::domain::record::Side;

pub type PreprocessResult<T> = Result<T, PreprocessError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreprocessError {
    /// No records at all — the padded width is undefined.
    #[error("corpus is empty: at least one record is required")]
    EmptyCorpus,

    /// A corpus entry is not an object or lacks a text field.
    #[error("record {index} is malformed: missing string field `{field}`")]
    MalformedRecord { index: usize, field: String },

    /// Encoding hit a character the side's vocabulary never saw.
    #[error("{side} record {record}: character {ch:?} at position {position} is not in the vocabulary")]
    UnknownCharacter {
        side:     Side,
        record:   usize,
        position: usize,
        ch:       char,
    },

    /// Decoding hit an index no character owns.
    #[error("index {index} does not belong to the vocabulary")]
    UnknownIndex { index: u32 },

    /// A padded matrix can only grow.
    #[error("cannot pad rows of width {width} down to {requested}")]
    WidthTooSmall { width: usize, requested: usize },

    /// A persisted vocabulary violates the index invariants.
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),
}

/// Raised by `Vocabulary::encode` before the caller knows which
/// record and side the text came from.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("character {ch:?} at position {position} is not in the vocabulary")]
pub struct UnknownCharacter {
    pub ch:       char,
    pub position: usize,
}

impl UnknownCharacter {
    /// Attach the side and record index to produce the full error
    pub fn in_record(self, side: Side, record: usize) -> PreprocessError {
        PreprocessError::UnknownCharacter {
            side,
            record,
            position: self.position,
            ch:       self.ch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_character_gets_context() {
        let e = UnknownCharacter { ch: 'ß', position: 3 }.in_record(Side::Target, 7);
        assert_eq!(
            e,
            PreprocessError::UnknownCharacter {
                side: Side::Target,
                record: 7,
                position: 3,
                ch: 'ß'
            }
        );
        assert!(e.to_string().contains("target record 7"));
    }

    #[test]
    fn test_malformed_record_message_names_field() {
        let e = PreprocessError::MalformedRecord { index: 2, field: "latin".into() };
        assert_eq!(e.to_string(), "record 2 is malformed: missing string field `latin`");
    }
}
