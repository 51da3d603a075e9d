// ============================================================
// Layer 4 — Padded Matrix
// ============================================================
// A rectangular table of vocabulary indices: one row per
// record, every row the same width.
//
// Rows shorter than the width are extended at the END with
// PAD_INDEX (0):
//
//   sequences        width = 3
//   [4]          →   [4, 0, 0]
//   [4, 5, 6]    →   [4, 5, 6]
//   []           →   [0, 0, 0]
//
// Storage is a single row-major Vec<u32>, which is also the
// layout the batcher hands to Tensor::from_ints.
//
// Reference: Rust Book §8 (Vectors), §13 (Iterators)

use crate::data::vocabulary::PAD_INDEX;
use crate::domain::error::{PreprocessError, PreprocessResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedMatrix {
    rows:  usize,
    width: usize,
    data:  Vec<u32>,
}

impl PaddedMatrix {
    /// End-pad every sequence to the longest one.
    pub fn from_sequences(sequences: &[Vec<u32>]) -> Self {
        let width = sequences.iter().map(Vec::len).max().unwrap_or(0);
        Self::pad_to(sequences, width)
    }

    fn pad_to(sequences: &[Vec<u32>], width: usize) -> Self {
        let mut data = Vec::with_capacity(sequences.len() * width);
        for seq in sequences {
            data.extend_from_slice(seq);
            data.resize(data.len() + (width - seq.len()), PAD_INDEX);
        }
        Self { rows: sequences.len(), width, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    #[cfg(test)]
    pub fn row(&self, i: usize) -> Option<&[u32]> {
        if i >= self.rows {
            return None;
        }
        Some(&self.data[i * self.width..(i + 1) * self.width])
    }

    /// Iterate rows in record order.
    /// A zero-width matrix still yields one (empty) row per record.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        (0..self.rows).map(move |i| &self.data[i * self.width..(i + 1) * self.width])
    }

    /// Row-major backing storage
    #[cfg(test)]
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// Append more padding so every row is `width` long.
    pub fn widen(&self, width: usize) -> PreprocessResult<Self> {
        if width < self.width {
            return Err(PreprocessError::WidthTooSmall {
                width:     self.width,
                requested: width,
            });
        }
        let rows: Vec<Vec<u32>> = self.iter_rows().map(<[u32]>::to_vec).collect();
        Ok(Self::pad_to(&rows, width))
    }
}
