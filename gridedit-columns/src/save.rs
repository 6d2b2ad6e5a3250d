//! Batch save of posted cell edits.

use crate::form::{Form, MergeMode};
use crate::grid::EditableGrid;
use gridedit_core::{GridResult, RecordId, RecordIdError};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ============================================================================
// REPORT TYPES
// ============================================================================

/// Why a posted entry was not saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The key is not a decimal record id.
    InvalidId,
    /// The entry's value is not a field-name mapping.
    NotAMapping,
    /// No record with that id exists.
    NotFound,
    /// The repository denied editing the record.
    NotEditable,
}

/// A posted entry that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SkippedEntry {
    /// The posted key, verbatim.
    pub key: String,
    pub reason: SkipReason,
}

/// Outcome of one batch save. Entries appear in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SaveReport {
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<u64>))]
    pub saved: Vec<RecordId>,
    pub skipped: Vec<SkippedEntry>,
}

impl SaveReport {
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty() && self.skipped.is_empty()
    }
}

// ============================================================================
// SAVE HANDLER
// ============================================================================

impl EditableGrid {
    /// Persist the edit set found in the grid's submitted value.
    ///
    /// `submitted` is the value posted under the grid's name; the edit set
    /// lives under the namespace key inside it as
    /// `{record id: {field name: raw value}}`. Each accepted entry is bound
    /// into the record with clear-missing semantics and saved on its own.
    /// Invalid, unknown and non-editable entries are skipped and reported.
    /// A repository write failure stops the batch; earlier saves stand.
    pub fn save(&self, submitted: &JsonValue) -> GridResult<SaveReport> {
        let mut report = SaveReport::default();

        let edit_set = match submitted.get(self.namespace()) {
            None => {
                tracing::debug!(grid = %self.name(), "No edit set submitted");
                return Ok(report);
            }
            Some(JsonValue::Object(edit_set)) => edit_set,
            Some(other) => {
                tracing::warn!(
                    grid = %self.name(),
                    namespace = %self.namespace(),
                    kind = json_kind(other),
                    "Ignoring malformed edit set"
                );
                return Ok(report);
            }
        };

        for (key, values) in edit_set {
            let record_id = match RecordId::parse_digits(key) {
                Ok(id) => id,
                Err(RecordIdError::NotDigits) => {
                    self.skip(&mut report, key, SkipReason::InvalidId);
                    continue;
                }
                // All digits but beyond any stored id.
                Err(RecordIdError::OutOfRange) => {
                    self.skip(&mut report, key, SkipReason::NotFound);
                    continue;
                }
            };
            let JsonValue::Object(values) = values else {
                self.skip(&mut report, key, SkipReason::NotAMapping);
                continue;
            };

            let repository = self.repository();
            let Some(record) = repository.get(record_id)? else {
                self.skip(&mut report, key, SkipReason::NotFound);
                continue;
            };
            if !repository.is_editable(record_id) {
                self.skip(&mut report, key, SkipReason::NotEditable);
                continue;
            }

            let mut form = Form::new(self.build_fields(&record)?, self.row_form_action(record_id));
            form.load_record(&record);
            form.load_data(values, MergeMode::ClearMissing);

            let mut updated = record.clone();
            form.save_into(&mut updated);

            if let Err(err) = repository.save(&updated) {
                tracing::error!(
                    grid = %self.name(),
                    record_id = %record_id,
                    error = %err,
                    saved = report.saved.len(),
                    "Batch save aborted"
                );
                return Err(err);
            }
            report.saved.push(record_id);
        }

        tracing::info!(
            grid = %self.name(),
            saved = report.saved.len(),
            skipped = report.skipped.len(),
            "Batch save complete"
        );
        Ok(report)
    }

    fn skip(&self, report: &mut SaveReport, key: &str, reason: SkipReason) {
        tracing::debug!(grid = %self.name(), key = %key, reason = ?reason, "Skipping edit set entry");
        report.skipped.push(SkippedEntry {
            key: key.to_string(),
            reason,
        });
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use gridedit_core::{FieldValue, GridEditError, Record, Schema, StorageError};
    use gridedit_storage::{InMemoryRepository, RecordRepository};
    use gridedit_test_utils::generators::{arb_non_digit_key, arb_record_id, arb_segment};
    use gridedit_test_utils::{article_repository, ARTICLE_COLUMNS};
    use proptest::prelude::*;
    use serde_json::json;
    use std::sync::Arc;

    fn grid_over(repository: Arc<dyn RecordRepository>) -> GridResult<EditableGrid> {
        let mut builder = EditableGrid::builder("Articles");
        for column in ARTICLE_COLUMNS {
            builder = builder.plain_column(*column);
        }
        builder.build(repository)
    }

    fn skipped(key: &str, reason: SkipReason) -> SkippedEntry {
        SkippedEntry {
            key: key.to_string(),
            reason,
        }
    }

    #[test]
    fn test_only_valid_entries_are_processed() -> GridResult<()> {
        let repository = article_repository();
        let grid = grid_over(repository.clone())?;

        let report = grid.save(&json!({
            "EditableColumns": {
                "5": {"Title": "Hi"},
                "abc": {"Title": "X"},
                "7": "not-a-map"
            }
        }))?;

        assert_eq!(report.saved, vec![RecordId(5)]);
        assert_eq!(
            report.skipped,
            vec![
                skipped("abc", SkipReason::InvalidId),
                skipped("7", SkipReason::NotAMapping),
            ]
        );
        assert_eq!(repository.write_log()?, vec![RecordId(5)]);

        let saved = repository.get(RecordId(5))?.expect("record 5 exists");
        assert_eq!(saved.get("Title"), &FieldValue::text("Hi"));
        let untouched = repository.get(RecordId(7))?.expect("record 7 exists");
        assert_eq!(untouched.get("Title"), &FieldValue::text("Article 7"));
        Ok(())
    }

    #[test]
    fn test_non_editable_record_is_not_saved() -> GridResult<()> {
        let repository = article_repository();
        repository.lock(RecordId(5))?;
        let grid = grid_over(repository.clone())?;

        let report = grid.save(&json!({
            "EditableColumns": {
                "5": {"Title": "Hi"},
                "abc": {"Title": "X"},
                "7": "not-a-map"
            }
        }))?;

        assert!(report.saved.is_empty());
        assert!(report.skipped.contains(&skipped("5", SkipReason::NotEditable)));
        assert!(repository.write_log()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_clear_missing_blanks_absent_fields() -> GridResult<()> {
        let repository = Arc::new(
            InMemoryRepository::new(
                Schema::new()
                    .column("Title", gridedit_core::ColumnType::Varchar)
                    .column("Body", gridedit_core::ColumnType::Text),
            )
            .with_records(vec![Record::new(1).with("Title", "Old").with("Body", "Keep?")])?,
        );
        let grid = EditableGrid::builder("Posts")
            .plain_column("Title")
            .plain_column("Body")
            .build(repository.clone())?;

        grid.save(&json!({"EditableColumns": {"1": {"Title": "New"}}}))?;

        let record = repository.get(RecordId(1))?.expect("record 1 exists");
        assert_eq!(record.get("Title"), &FieldValue::text("New"));
        assert_eq!(record.get("Body"), &FieldValue::Null);
        Ok(())
    }

    #[test]
    fn test_columns_outside_the_grid_are_preserved() -> GridResult<()> {
        let repository = article_repository();
        let grid = EditableGrid::builder("Articles")
            .plain_column("Title")
            .build(repository.clone())?;

        grid.save(&json!({"EditableColumns": {"3": {"Title": "Renamed", "Body": "ignored"}}}))?;

        let record = repository.get(RecordId(3))?.expect("record 3 exists");
        assert_eq!(record.get("Title"), &FieldValue::text("Renamed"));
        assert_eq!(record.get("Body"), &FieldValue::text("Body of article 3"));
        Ok(())
    }

    #[test]
    fn test_submitted_values_are_parsed_by_field_kind() -> GridResult<()> {
        let repository = article_repository();
        let grid = grid_over(repository.clone())?;

        grid.save(&json!({
            "EditableColumns": {
                "3": {
                    "Title": "T",
                    "Body": "B",
                    "Published": "1",
                    "Rating": "4",
                    "PublishedOn": "2025-01-31",
                    "Status": "Live"
                }
            }
        }))?;

        let record = repository.get(RecordId(3))?.expect("record 3 exists");
        assert_eq!(record.get("Published"), &FieldValue::Bool(true));
        assert_eq!(record.get("Rating"), &FieldValue::Int(4));
        assert_eq!(record.get("Status"), &FieldValue::text("Live"));
        Ok(())
    }

    #[test]
    fn test_unknown_and_oversized_ids_are_not_found() -> GridResult<()> {
        let repository = article_repository();
        let grid = grid_over(repository.clone())?;

        let report = grid.save(&json!({
            "EditableColumns": {
                "9999999": {"Title": "Nope"},
                "123456789012345678901234567890": {"Title": "Nope"}
            }
        }))?;

        assert!(report.saved.is_empty());
        assert_eq!(
            report.skipped,
            vec![
                skipped("9999999", SkipReason::NotFound),
                skipped("123456789012345678901234567890", SkipReason::NotFound),
            ]
        );
        assert_eq!(repository.record_count()?, 3);
        Ok(())
    }

    #[test]
    fn test_absent_or_malformed_edit_set_is_a_no_op() -> GridResult<()> {
        let repository = article_repository();
        let grid = grid_over(repository.clone())?;

        assert!(grid.save(&json!({}))?.is_empty());
        assert!(grid.save(&JsonValue::Null)?.is_empty());
        assert!(grid.save(&json!({"EditableColumns": "oops"}))?.is_empty());
        assert!(grid.save(&json!({"EditableColumns": ["5"]}))?.is_empty());
        assert!(grid.save(&json!({"OtherNamespace": {"5": {"Title": "x"}}}))?.is_empty());
        assert!(repository.write_log()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_entries_are_saved_in_encounter_order() -> GridResult<()> {
        let repository = article_repository();
        let grid = grid_over(repository.clone())?;

        let report = grid.save(&json!({
            "EditableColumns": {
                "7": {"Title": "Seven"},
                "3": {"Title": "Three"},
                "5": {"Title": "Five"}
            }
        }))?;

        let expected = vec![RecordId(7), RecordId(3), RecordId(5)];
        assert_eq!(report.saved, expected);
        assert_eq!(repository.write_log()?, expected);
        Ok(())
    }

    /// Repository that fails every write.
    struct FailingRepository {
        inner: Arc<InMemoryRepository>,
    }

    impl RecordRepository for FailingRepository {
        fn schema(&self) -> &Schema {
            self.inner.schema()
        }

        fn get(&self, id: RecordId) -> GridResult<Option<Record>> {
            self.inner.get(id)
        }

        fn list(&self) -> GridResult<Vec<Record>> {
            self.inner.list()
        }

        fn save(&self, record: &Record) -> GridResult<()> {
            Err(StorageError::WriteFailed {
                id: record.id,
                reason: "disk full".to_string(),
            }
            .into())
        }

        fn is_editable(&self, id: RecordId) -> bool {
            self.inner.is_editable(id)
        }
    }

    #[test]
    fn test_write_failure_aborts_batch() -> GridResult<()> {
        let grid = grid_over(Arc::new(FailingRepository {
            inner: article_repository(),
        }))?;

        let err = grid
            .save(&json!({"EditableColumns": {"3": {"Title": "x"}, "5": {"Title": "y"}}}))
            .expect_err("writes fail");
        assert!(matches!(
            err,
            GridEditError::Storage(StorageError::WriteFailed { id: RecordId(3), .. })
        ));
        Ok(())
    }

    #[test]
    fn test_report_serialization() -> Result<(), serde_json::Error> {
        let report = SaveReport {
            saved: vec![RecordId(5)],
            skipped: vec![skipped("abc", SkipReason::InvalidId)],
        };
        let json = serde_json::to_value(&report)?;
        assert_eq!(
            json,
            json!({"saved": [5], "skipped": [{"key": "abc", "reason": "invalid_id"}]})
        );
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_non_digit_keys_never_save(key in arb_non_digit_key(), title in "[a-z]{0,8}") {
            let repository = article_repository();
            let grid = grid_over(repository.clone()).expect("grid builds");

            let mut edit_set = serde_json::Map::new();
            edit_set.insert(key.clone(), json!({"Title": title}));
            let report = grid
                .save(&json!({"EditableColumns": edit_set}))
                .expect("skips are not errors");

            prop_assert!(report.saved.is_empty());
            prop_assert_eq!(report.skipped, vec![skipped(&key, SkipReason::InvalidId)]);
            prop_assert!(repository.write_log().expect("log readable").is_empty());
        }

        #[test]
        fn prop_rendered_names_decode_to_their_cell(
            grid_name in arb_segment(),
            namespace in arb_segment(),
            id in arb_record_id(),
            column in arb_segment(),
        ) {
            let grid = EditableGrid::builder(grid_name.clone())
                .namespace(namespace.clone())
                .plain_column(column.clone())
                .build(article_repository())
                .expect("segments are valid");

            let name = grid.field_name(id, &column);
            let decoded = grid.codec().decode(&name).expect("own names decode");
            prop_assert_eq!(decoded.grid, grid_name);
            prop_assert_eq!(decoded.namespace, namespace);
            prop_assert_eq!(decoded.record_id, id);
            prop_assert_eq!(decoded.field, column);
        }
    }
}
