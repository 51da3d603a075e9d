// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Reads the parallel corpus from a JSON file shaped like:
//
//   [
//     { "urdu": "سلام", "latin": "salaam" },
//     { "urdu": "کتاب", "latin": "kitaab" },
//     ...
//   ]
//
// Each object becomes one Record. The field names default to
// `urdu` / `latin` but are configurable, so the same loader
// works for any script pair.
//
// Validation is strict: an entry that is not an object, or
// that lacks either field as a string, fails the whole load
// with MalformedRecord carrying the entry's index. Extra
// fields are ignored.
//
// Reference: serde_json documentation (untyped Value)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde_json::Value;
use std::{fs, path::PathBuf};

use crate::domain::error::PreprocessError;
use crate::domain::record::Record;
use crate::domain::traits::RecordSource;

pub const DEFAULT_SOURCE_FIELD: &str = "urdu";
pub const DEFAULT_TARGET_FIELD: &str = "latin";

/// Loads records from a JSON array file.
/// Implements the RecordSource trait from Layer 3.
pub struct JsonCorpusLoader {
    path:         PathBuf,
    source_field: String,
    target_field: String,
}

impl JsonCorpusLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path:         path.into(),
            source_field: DEFAULT_SOURCE_FIELD.to_string(),
            target_field: DEFAULT_TARGET_FIELD.to_string(),
        }
    }

    /// Override the JSON field names for the source and target texts
    pub fn with_fields(
        mut self,
        source_field: impl Into<String>,
        target_field: impl Into<String>,
    ) -> Self {
        self.source_field = source_field.into();
        self.target_field = target_field.into();
        self
    }
}

impl RecordSource for JsonCorpusLoader {
    fn load_all(&self) -> Result<Vec<Record>> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read corpus '{}'", self.path.display()))?;

        let records = parse_records(&json, &self.source_field, &self.target_field)
            .with_context(|| format!("Invalid corpus '{}'", self.path.display()))?;

        tracing::info!(
            "Loaded {} records from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

/// Parse a JSON array of objects into records, in order.
pub fn parse_records(json: &str, source_field: &str, target_field: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(json).context("Corpus is not valid JSON")?;

    let entries = value
        .as_array()
        .context("Corpus must be a JSON array of objects")?;

    let records = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let source = text_field(entry, index, source_field)?;
            let target = text_field(entry, index, target_field)?;
            Ok(Record::new(source, target))
        })
        .collect::<Result<Vec<Record>, PreprocessError>>()?;

    Ok(records)
}

fn text_field<'a>(entry: &'a Value, index: usize, field: &str) -> Result<&'a str, PreprocessError> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| PreprocessError::MalformedRecord {
            index,
            field: field.to_string(),
        })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn malformed(err: anyhow::Error) -> Option<PreprocessError> {
        err.downcast_ref::<PreprocessError>().cloned()
    }

    #[test]
    fn test_parses_records_in_order() {
        let json = r#"[
            {"urdu": "سلام", "latin": "salaam"},
            {"urdu": "دل",   "latin": "dil", "note": "ignored"}
        ]"#;
        let records = parse_records(json, "urdu", "latin").unwrap();
        assert_eq!(
            records,
            vec![Record::new("سلام", "salaam"), Record::new("دل", "dil")]
        );
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let json = r#"[{"urdu": "a", "latin": "b"}, {"urdu": "c"}]"#;
        let err = parse_records(json, "urdu", "latin").unwrap_err();
        assert_eq!(
            malformed(err),
            Some(PreprocessError::MalformedRecord { index: 1, field: "latin".into() })
        );
    }

    #[test]
    fn test_non_string_field_is_malformed() {
        let json = r#"[{"urdu": 5, "latin": "b"}]"#;
        let err = parse_records(json, "urdu", "latin").unwrap_err();
        assert_eq!(
            malformed(err),
            Some(PreprocessError::MalformedRecord { index: 0, field: "urdu".into() })
        );
    }

    #[test]
    fn test_non_object_entry_is_malformed() {
        let json = r#"["just a string"]"#;
        let err = parse_records(json, "urdu", "latin").unwrap_err();
        assert!(matches!(
            malformed(err),
            Some(PreprocessError::MalformedRecord { index: 0, .. })
        ));
    }

    #[test]
    fn test_top_level_must_be_array() {
        assert!(parse_records(r#"{"urdu": "a"}"#, "urdu", "latin").is_err());
        assert!(parse_records("not json", "urdu", "latin").is_err());
    }

    #[test]
    fn test_empty_array_loads_as_empty() {
        assert!(parse_records("[]", "urdu", "latin").unwrap().is_empty());
    }

    #[test]
    fn test_loader_reads_custom_fields_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"hindi": "नमस्ते", "roman": "namaste"}}]"#).unwrap();

        let loader = JsonCorpusLoader::new(file.path()).with_fields("hindi", "roman");
        let records = loader.load_all().unwrap();
        assert_eq!(records, vec![Record::new("नमस्ते", "namaste")]);
    }

    #[test]
    fn test_loader_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loader = JsonCorpusLoader::new(dir.path().join("nope.json"));
        assert!(loader.load_all().is_err());
    }
}
