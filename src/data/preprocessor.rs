// ============================================================
// Layer 4 — Sequence Preprocessor
// ============================================================
// Turns the ordered list of records into the four artifacts
// the training stage needs:
//
//   source_matrix  — padded Urdu indices,  [records × src_width]
//   target_matrix  — padded Latin indices, [records × tgt_width]
//   source_vocab   — Urdu char  → index
//   target_vocab   — Latin char → index
//
// Steps (each side handled independently):
//   1. Project records into source texts and target texts
//   2. Build a vocabulary in first-appearance order (from 1)
//   3. Encode every text through its side's vocabulary
//   4. End-pad every sequence to that side's longest one
//
// The two widths are not forced to match here; aligning them
// is the training stage's concern (see PaddedMatrix::widen).
//
// This is a pure function of its input: no I/O, no state kept
// after `run` returns.
//
// Reference: Rust Book §13 (Iterators and Closures)

use crate::data::{padded::PaddedMatrix, vocabulary::Vocabulary};
use crate::domain::{
    error::{PreprocessError, PreprocessResult},
    record::{Record, Side},
};

/// Everything the preprocessor hands back to its caller.
#[derive(Debug, Clone)]
pub struct PreprocessOutput {
    pub source_matrix: PaddedMatrix,
    pub target_matrix: PaddedMatrix,
    pub source_vocab:  Vocabulary,
    pub target_vocab:  Vocabulary,
}

impl PreprocessOutput {
    /// Distinct source characters + 1 for padding
    pub fn source_vocab_size(&self) -> usize {
        self.source_vocab.size()
    }

    /// Distinct target characters + 1 for padding
    pub fn target_vocab_size(&self) -> usize {
        self.target_vocab.size()
    }
}

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Build both vocabularies from `records`, then encode and pad.
    pub fn run(&self, records: &[Record]) -> PreprocessResult<PreprocessOutput> {
        if records.is_empty() {
            return Err(PreprocessError::EmptyCorpus);
        }

        let source_vocab = Vocabulary::build(records.iter().map(|r| r.source.as_str()));
        let target_vocab = Vocabulary::build(records.iter().map(|r| r.target.as_str()));

        self.encode_with(records, &source_vocab, &target_vocab)
    }

    /// Encode and pad `records` against vocabularies built elsewhere,
    /// e.g. ones reloaded from a previous run. Any character missing
    /// from a vocabulary surfaces as `UnknownCharacter`.
    pub fn encode_with(
        &self,
        records:      &[Record],
        source_vocab: &Vocabulary,
        target_vocab: &Vocabulary,
    ) -> PreprocessResult<PreprocessOutput> {
        if records.is_empty() {
            return Err(PreprocessError::EmptyCorpus);
        }

        let source_matrix = encode_side(records, Side::Source, source_vocab)?;
        let target_matrix = encode_side(records, Side::Target, target_vocab)?;

        tracing::debug!(
            "Preprocessed {} records: source {}x{} (vocab {}), target {}x{} (vocab {})",
            records.len(),
            source_matrix.rows(),
            source_matrix.width(),
            source_vocab.size(),
            target_matrix.rows(),
            target_matrix.width(),
            target_vocab.size(),
        );

        Ok(PreprocessOutput {
            source_matrix,
            target_matrix,
            source_vocab: source_vocab.clone(),
            target_vocab: target_vocab.clone(),
        })
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode one side of every record and pad to that side's maximum.
fn encode_side(
    records: &[Record],
    side:    Side,
    vocab:   &Vocabulary,
) -> PreprocessResult<PaddedMatrix> {
    let sequences = records
        .iter()
        .enumerate()
        .map(|(i, r)| vocab.encode(r.text(side)).map_err(|e| e.in_record(side, i)))
        .collect::<PreprocessResult<Vec<Vec<u32>>>>()?;

    Ok(PaddedMatrix::from_sequences(&sequences))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocabulary::PAD_INDEX;

    fn corpus() -> Vec<Record> {
        vec![
            Record::new("سلام", "salaam"),
            Record::new("کتاب", "kitaab"),
            Record::new("دل", "dil"),
            Record::new("", "z"),
        ]
    }

    #[test]
    fn test_boundary_scenario() {
        let records = vec![Record::new("a", "x"), Record::new("ab", "y")];
        let out = Preprocessor::new().run(&records).unwrap();

        assert_eq!(out.source_vocab_size(), 3);
        assert_eq!(out.source_matrix.rows(), 2);
        assert_eq!(out.source_matrix.width(), 2);

        let a = out.source_vocab.index_of('a').unwrap();
        let b = out.source_vocab.index_of('b').unwrap();
        assert_eq!(out.source_matrix.row(0).unwrap(), &[a, PAD_INDEX]);
        assert_eq!(out.source_matrix.row(1).unwrap(), &[a, b]);

        // Target side is padded to its own maximum (1), not the source's
        assert_eq!(out.target_vocab_size(), 3);
        assert_eq!(out.target_matrix.width(), 1);
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let err = Preprocessor::new().run(&[]).unwrap_err();
        assert_eq!(err, PreprocessError::EmptyCorpus);
    }

    #[test]
    fn test_empty_text_becomes_all_padding() {
        let out = Preprocessor::new().run(&[Record::new("", "z")]).unwrap();
        assert_eq!(out.source_matrix.width(), 0);
        assert_eq!(out.source_vocab_size(), 1);
        assert_eq!(out.source_matrix.rows(), 1);

        let out = Preprocessor::new().run(&corpus()).unwrap();
        let last = out.source_matrix.row(3).unwrap();
        assert_eq!(last.len(), 4);
        assert!(last.iter().all(|&x| x == PAD_INDEX));
    }

    #[test]
    fn test_row_counts_match_record_count() {
        let records = corpus();
        let out = Preprocessor::new().run(&records).unwrap();
        assert_eq!(out.source_matrix.rows(), records.len());
        assert_eq!(out.target_matrix.rows(), records.len());
    }

    #[test]
    fn test_vocabulary_covers_every_character() {
        let records = corpus();
        let out = Preprocessor::new().run(&records).unwrap();

        for r in &records {
            for c in r.source.chars() {
                let idx = out.source_vocab.index_of(c).unwrap() as usize;
                assert!((1..out.source_vocab_size()).contains(&idx));
            }
            for c in r.target.chars() {
                let idx = out.target_vocab.index_of(c).unwrap() as usize;
                assert!((1..out.target_vocab_size()).contains(&idx));
            }
        }
    }

    #[test]
    fn test_padding_follows_real_content() {
        let records = corpus();
        let out = Preprocessor::new().run(&records).unwrap();
        let width = records.iter().map(|r| r.target.chars().count()).max().unwrap();

        for (r, row) in records.iter().zip(out.target_matrix.iter_rows()) {
            assert_eq!(row.len(), width);
            let n = r.target.chars().count();
            assert!(row[..n].iter().all(|&x| x != PAD_INDEX));
            assert!(row[n..].iter().all(|&x| x == PAD_INDEX));
        }
    }

    #[test]
    fn test_rows_decode_back_to_original_text() {
        let records = corpus();
        let out = Preprocessor::new().run(&records).unwrap();

        for (r, row) in records.iter().zip(out.source_matrix.iter_rows()) {
            assert_eq!(out.source_vocab.decode(row).unwrap(), r.source);
        }
        for (r, row) in records.iter().zip(out.target_matrix.iter_rows()) {
            assert_eq!(out.target_vocab.decode(row).unwrap(), r.target);
        }
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let records = corpus();
        let p = Preprocessor::new();
        let first  = p.run(&records).unwrap();
        let second = p.run(&records).unwrap();
        assert_eq!(first.source_matrix, second.source_matrix);
        assert_eq!(first.target_matrix, second.target_matrix);
        assert_eq!(first.source_vocab, second.source_vocab);
        assert_eq!(first.target_vocab, second.target_vocab);
    }

    #[test]
    fn test_fixed_vocabulary_rejects_new_characters() {
        let p = Preprocessor::new();
        let trained = p.run(&[Record::new("ab", "xy")]).unwrap();

        let fresh = vec![Record::new("ab", "xy"), Record::new("ac", "x")];
        let err = p
            .encode_with(&fresh, &trained.source_vocab, &trained.target_vocab)
            .unwrap_err();

        assert_eq!(
            err,
            PreprocessError::UnknownCharacter {
                side: Side::Source,
                record: 1,
                position: 1,
                ch: 'c',
            }
        );
    }

    #[test]
    fn test_fixed_vocabulary_encodes_known_text() {
        let p = Preprocessor::new();
        let trained = p.run(&[Record::new("abc", "xyz")]).unwrap();

        let out = p
            .encode_with(&[Record::new("ca", "zz")], &trained.source_vocab, &trained.target_vocab)
            .unwrap();
        assert_eq!(out.source_matrix.row(0).unwrap(), &[3, 1]);
        assert_eq!(out.target_matrix.row(0).unwrap(), &[3, 3]);
        assert_eq!(out.source_vocab_size(), 4);
    }
}
