// ============================================================
// Layer 3 — Record Domain Type
// ============================================================
// One training example from the parallel corpus:
//   source — the Urdu script text
//   target — its Latin transliteration
//
// Example:
//   Record { source: "سلام", target: "salaam" }
//
// The corpus file names these fields `urdu` and `latin`;
// the loader maps whatever field names it is configured with
// onto `source` and `target`, so nothing past Layer 4 cares.
//
// Reference: Rust Book §5 (Structs), §6 (Enums)

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single source/target text pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Text in the source script (Urdu)
    pub source: String,

    /// Text in the target script (Latin)
    pub target: String,
}

impl Record {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Borrow the text belonging to one side of the pair
    pub fn text(&self, side: Side) -> &str {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }
}

/// Either half of the corpus. Vocabularies and padding widths
/// are computed independently for each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Source,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Target => write!(f, "target"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_selects_side() {
        let r = Record::new("ab", "xy");
        assert_eq!(r.text(Side::Source), "ab");
        assert_eq!(r.text(Side::Target), "xy");
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Source.to_string(), "source");
        assert_eq!(Side::Target.to_string(), "target");
    }
}
