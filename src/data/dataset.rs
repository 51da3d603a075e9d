use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::padded::PaddedMatrix;
use crate::domain::error::{PreprocessError, PreprocessResult};

/// One aligned training pair: source indices in, target indices out.
/// Both rows have the same (shared, padded) width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransliterationSample {
    pub source_ids: Vec<u32>,
    pub target_ids: Vec<u32>,
}

pub struct TransliterationDataset {
    samples: Vec<TransliterationSample>,
}

impl TransliterationDataset {
    pub fn new(samples: Vec<TransliterationSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<TransliterationSample> for TransliterationDataset {
    fn get(&self, index: usize) -> Option<TransliterationSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Widen both matrices to a shared width and zip them row by row.
///
/// A per-timestep classifier emits one label per input position,
/// so source and target rows must be the same length. Returns the
/// shared width alongside the samples.
pub fn align_samples(
    source: &PaddedMatrix,
    target: &PaddedMatrix,
) -> PreprocessResult<(usize, Vec<TransliterationSample>)> {
    if source.rows() == 0 {
        return Err(PreprocessError::EmptyCorpus);
    }
    debug_assert_eq!(source.rows(), target.rows());

    let width  = source.width().max(target.width());
    let source = source.widen(width)?;
    let target = target.widen(width)?;

    let samples = source
        .iter_rows()
        .zip(target.iter_rows())
        .map(|(s, t)| TransliterationSample {
            source_ids: s.to_vec(),
            target_ids: t.to_vec(),
        })
        .collect();

    Ok((width, samples))
}
