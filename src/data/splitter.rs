// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Holds out the LAST `validation_split` fraction of the samples,
// in corpus order, for validation:
//   - Training set:   used to update model weights
//   - Validation set: measures accuracy on unseen words
//
// No shuffling happens here. The validation rows are always the
// tail of the corpus, the same rows a Keras/TF.js fit() with
// `validationSplit` would hold out. The training DataLoader
// shuffles its own batches every epoch.
//
// Default ratio: 80% training, 20% validation.
//
// Reference: Rust Book §8 (Vectors)

/// Split `samples` into (train, validation), validation taken from the end.
///
/// # Example
/// ```ignore
/// let (train, val) = split_train_val(all_samples, 0.2);
/// // train has the first 80% of samples, val the last 20%
/// ```
pub fn split_train_val<T>(mut samples: Vec<T>, validation_split: f64) -> (Vec<T>, Vec<T>) {
    let total = samples.len();
    let n_val = ((total as f64) * validation_split).round() as usize;

    // Clamp so tiny corpora never panic in split_off
    let split_at = total - n_val.min(total);

    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        samples.len(),
        val.len(),
    );

    (samples, val)
}
