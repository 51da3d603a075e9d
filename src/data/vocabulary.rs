// ============================================================
// Layer 4 — Character Vocabulary
// ============================================================
// Maps every distinct character on one side of the corpus to
// a positive integer index, and back again.
//
// Index layout:
//   0        → padding sentinel (PAD_INDEX), never a character
//   1..=len  → real characters, in order of first appearance
//
// So a vocabulary of N distinct characters has size N + 1,
// which is exactly the embedding/classifier width the model
// needs.
//
// First-appearance order makes indices reproducible: the same
// corpus in the same order always yields the same mapping.
//
// On disk a vocabulary is a flat JSON object
//   { "س": 1, "ل": 2, "ا": 3, ... }
// written in index order.
//
// Reference: Rust Book §8 (Hash Maps)
//            serde documentation (custom Serialize/Deserialize)

use std::collections::HashMap;

use serde::{
    de::{self, Deserializer},
    ser::{SerializeMap, Serializer},
    Deserialize, Serialize,
};

use crate::domain::error::{PreprocessError, PreprocessResult, UnknownCharacter};

/// Index reserved for padding. No character ever maps to it.
pub const PAD_INDEX: u32 = 0;

/// Bijective character ↔ index mapping for one side of the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    /// chars[i] owns index i + 1
    chars: Vec<char>,
    index: HashMap<char, u32>,
}

impl Vocabulary {
    /// Build a vocabulary from texts, assigning indices in order
    /// of first appearance across the concatenation of `texts`.
    pub fn build<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut vocab = Self::default();
        for text in texts {
            for c in text.chars() {
                vocab.insert(c);
            }
        }
        vocab
    }

    /// Rebuild a vocabulary from explicit (character, index) pairs,
    /// e.g. after reading it back from disk.
    ///
    /// The indices must be exactly 1..=n with no repeats, and no
    /// character may appear twice.
    pub fn from_entries<I>(entries: I) -> PreprocessResult<Self>
    where
        I: IntoIterator<Item = (char, u32)>,
    {
        let mut entries: Vec<(char, u32)> = entries.into_iter().collect();
        entries.sort_by_key(|&(_, idx)| idx);

        let mut vocab = Self::default();
        for (position, (c, idx)) in entries.into_iter().enumerate() {
            let expected = position as u32 + 1;
            if idx != expected {
                return Err(PreprocessError::InvalidVocabulary(format!(
                    "expected index {expected} for {c:?}, found {idx}"
                )));
            }
            if vocab.index.contains_key(&c) {
                return Err(PreprocessError::InvalidVocabulary(format!(
                    "character {c:?} is mapped more than once"
                )));
            }
            vocab.insert(c);
        }
        Ok(vocab)
    }

    fn insert(&mut self, c: char) {
        if !self.index.contains_key(&c) {
            self.chars.push(c);
            self.index.insert(c, self.chars.len() as u32);
        }
    }

    /// Number of distinct characters (padding excluded)
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Distinct characters + 1 for the padding sentinel
    pub fn size(&self) -> usize {
        self.chars.len() + 1
    }

    pub fn index_of(&self, c: char) -> Option<u32> {
        self.index.get(&c).copied()
    }

    pub fn char_of(&self, index: u32) -> Option<char> {
        if index == PAD_INDEX {
            return None;
        }
        self.chars.get(index as usize - 1).copied()
    }

    /// (character, index) pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        self.chars
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i as u32 + 1))
    }

    /// Map every character of `text` to its index.
    /// Fails on the first character this vocabulary does not know.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>, UnknownCharacter> {
        text.chars()
            .enumerate()
            .map(|(position, ch)| {
                self.index_of(ch)
                    .ok_or(UnknownCharacter { ch, position })
            })
            .collect()
    }

    /// Inverse of `encode` for one padded row: trailing padding is
    /// dropped, every other index must belong to a character.
    pub fn decode(&self, row: &[u32]) -> PreprocessResult<String> {
        let end = row
            .iter()
            .rposition(|&idx| idx != PAD_INDEX)
            .map_or(0, |last| last + 1);

        row[..end]
            .iter()
            .map(|&index| {
                self.char_of(index)
                    .ok_or(PreprocessError::UnknownIndex { index })
            })
            .collect()
    }
}

impl Serialize for Vocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (c, idx) in self.iter() {
            map.serialize_entry(&c.to_string(), &idx)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Vocabulary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, u32>::deserialize(deserializer)?;

        let mut entries = Vec::with_capacity(raw.len());
        for (key, idx) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => entries.push((c, idx)),
                _ => {
                    return Err(de::Error::custom(format!(
                        "vocabulary key {key:?} is not a single character"
                    )))
                }
            }
        }

        Vocabulary::from_entries(entries).map_err(de::Error::custom)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_first_appearance() {
        let v = Vocabulary::build(["bca", "ab"]);
        assert_eq!(v.index_of('b'), Some(1));
        assert_eq!(v.index_of('c'), Some(2));
        assert_eq!(v.index_of('a'), Some(3));
        assert_eq!(v.len(), 3);
        assert_eq!(v.size(), 4);
    }

    #[test]
    fn test_padding_index_is_never_assigned() {
        let v = Vocabulary::build(["hello world"]);
        assert!(v.iter().all(|(_, idx)| idx != PAD_INDEX));
        assert_eq!(v.char_of(PAD_INDEX), None);
    }

    #[test]
    fn test_urdu_characters_are_single_entries() {
        let v = Vocabulary::build(["سلام", "کتاب"]);
        // س ل ا م ک ت ب — 'ا' repeats
        assert_eq!(v.len(), 7);
        assert_eq!(v.encode("اب").unwrap(), vec![3, 7]);
    }

    #[test]
    fn test_encode_reports_unknown_character() {
        let v = Vocabulary::build(["abc"]);
        let err = v.encode("abz").unwrap_err();
        assert_eq!(err, UnknownCharacter { ch: 'z', position: 2 });
    }

    #[test]
    fn test_decode_drops_trailing_padding() {
        let v = Vocabulary::build(["ab"]);
        assert_eq!(v.decode(&[1, 2, 0, 0]).unwrap(), "ab");
        assert_eq!(v.decode(&[0, 0]).unwrap(), "");
    }

    #[test]
    fn test_decode_rejects_interior_padding_and_unknown_index() {
        let v = Vocabulary::build(["ab"]);
        assert_eq!(
            v.decode(&[1, 0, 2]),
            Err(PreprocessError::UnknownIndex { index: 0 })
        );
        assert_eq!(
            v.decode(&[9]),
            Err(PreprocessError::UnknownIndex { index: 9 })
        );
    }

    #[test]
    fn test_json_keeps_index_order_and_reloads() {
        let v = Vocabulary::build(["zyx"]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"z":1,"y":2,"x":3}"#);

        let back: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_from_entries_rejects_gaps_and_zero() {
        assert!(matches!(
            Vocabulary::from_entries([('a', 1), ('b', 3)]),
            Err(PreprocessError::InvalidVocabulary(_))
        ));
        assert!(matches!(
            Vocabulary::from_entries([('a', 0)]),
            Err(PreprocessError::InvalidVocabulary(_))
        ));
        assert!(matches!(
            Vocabulary::from_entries([('a', 1), ('a', 2)]),
            Err(PreprocessError::InvalidVocabulary(_))
        ));
    }

    #[test]
    fn test_deserialize_rejects_multi_char_key() {
        let res: Result<Vocabulary, _> = serde_json::from_str(r#"{"ab":1}"#);
        assert!(res.is_err());
    }
}
