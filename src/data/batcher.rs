// ============================================================
// Layer 4 — Transliteration Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec of samples
// into two [batch_size, seq_len] integer tensors.
//
// All samples share one width (align_samples widened them),
// so batching is a flatten + reshape with no extra padding:
//
//   [s1_t1, ..., s1_tS, s2_t1, ..., sN_tS] → [N, S]
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::TransliterationSample;

#[derive(Debug, Clone)]
pub struct TransliterationBatch<B: Backend> {
    /// Source character indices — shape: [batch_size, seq_len]
    pub source_ids: Tensor<B, 2, Int>,

    /// Target character indices — shape: [batch_size, seq_len]
    /// One class label per timestep; 0 marks padding
    pub target_ids: Tensor<B, 2, Int>,
}

#[derive(Clone, Debug)]
pub struct TransliterationBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> TransliterationBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<TransliterationSample, TransliterationBatch<B>>
    for TransliterationBatcher<B>
{
    fn batch(&self, items: Vec<TransliterationSample>) -> TransliterationBatch<B> {
        let batch_size = items.len();
        let seq_len    = items[0].source_ids.len();

        // Burn Int tensors are built from i32 slices
        let source_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.source_ids.iter().map(|&x| x as i32))
            .collect();

        let target_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.target_ids.iter().map(|&x| x as i32))
            .collect();

        let source_ids = Tensor::<B, 1, Int>::from_ints(
            source_flat.as_slice(), &self.device
        ).reshape([batch_size, seq_len]);

        let target_ids = Tensor::<B, 1, Int>::from_ints(
            target_flat.as_slice(), &self.device
        ).reshape([batch_size, seq_len]);

        TransliterationBatch { source_ids, target_ids }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_shapes_and_values() {
        let batcher = TransliterationBatcher::<NdArray>::new(Default::default());
        let batch = batcher.batch(vec![
            TransliterationSample { source_ids: vec![1, 2, 0], target_ids: vec![3, 0, 0] },
            TransliterationSample { source_ids: vec![2, 2, 1], target_ids: vec![1, 2, 3] },
        ]);

        assert_eq!(batch.source_ids.dims(), [2, 3]);
        assert_eq!(batch.target_ids.dims(), [2, 3]);

        let targets: Vec<i64> = batch
            .target_ids
            .into_data()
            .convert::<i64>()
            .to_vec()
            .unwrap();
        assert_eq!(targets, vec![3, 0, 0, 1, 2, 3]);
    }
}
