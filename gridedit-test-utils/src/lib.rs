//! GRIDEDIT Test Utilities
//!
//! Shared test infrastructure for the GRIDEDIT workspace:
//! - Article schema and seeded in-memory repository fixtures
//! - Proptest generators for names, ids and field values
//! - Assertions over `GridResult` outcomes

pub use gridedit_core::{
    ColumnType, FieldValue, GridEditError, GridError, GridResult, Record, RecordId, Schema,
};
pub use gridedit_storage::{InMemoryRepository, RecordRepository};

pub use fixtures::{
    article_repository, article_schema, sample_article, ARTICLE_COLUMNS, ARTICLE_GRID_TOML,
    SEEDED_IDS,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built fixtures around a small article table.

    use super::*;
    use std::sync::Arc;

    /// Columns of the article schema, in schema order.
    pub const ARTICLE_COLUMNS: &[&str] =
        &["Title", "Body", "Published", "Rating", "PublishedOn", "Status"];

    /// Ids of the records [`article_repository`] is seeded with.
    pub const SEEDED_IDS: &[u64] = &[3, 5, 7];

    /// Grid configuration over the article schema.
    pub const ARTICLE_GRID_TOML: &str = r#"
name = "Articles"
link = "/articles"

[columns.Title]
title = "Headline"

[columns.Body]

[columns.Published]

[columns.Rating]
field = "numeric"

[columns.Status]

[casting]
Title = { limit_characters = 60 }
"#;

    pub fn article_schema() -> Schema {
        Schema::new()
            .column("Title", ColumnType::Varchar)
            .column("Body", ColumnType::Text)
            .column("Published", ColumnType::Boolean)
            .column("Rating", ColumnType::Int)
            .column("PublishedOn", ColumnType::Date)
            .column(
                "Status",
                ColumnType::Enum(vec!["Draft".to_string(), "Live".to_string()]),
            )
    }

    /// Article record with every schema column set.
    pub fn sample_article(id: u64) -> Record {
        Record::new(id)
            .with("Title", format!("Article {}", id))
            .with("Body", format!("Body of article {}", id))
            .with("Published", id % 2 == 1)
            .with("Rating", (id % 5) as i64)
            .with("PublishedOn", "2024-03-09")
            .with("Status", "Draft")
    }

    /// Repository over [`article_schema`] holding [`SEEDED_IDS`].
    pub fn article_repository() -> Arc<InMemoryRepository> {
        let repository = InMemoryRepository::new(article_schema());
        for id in SEEDED_IDS {
            repository
                .insert(sample_article(*id))
                .expect("fresh repository accepts inserts");
        }
        Arc::new(repository)
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for GRIDEDIT types.

    use super::*;
    use proptest::prelude::*;

    /// A name usable as a grid, namespace or field segment.
    pub fn arb_segment() -> impl Strategy<Value = String> {
        "[A-Za-z_][A-Za-z0-9_]{0,15}"
    }

    pub fn arb_record_id() -> impl Strategy<Value = RecordId> {
        any::<u64>().prop_map(RecordId)
    }

    /// Strings that are never all ASCII digits.
    pub fn arb_non_digit_key() -> impl Strategy<Value = String> {
        "[0-9]{0,4}[a-z\\-\\. ][0-9a-z]{0,4}"
    }

    pub fn arb_field_value() -> impl Strategy<Value = FieldValue> {
        prop_oneof![
            Just(FieldValue::Null),
            any::<bool>().prop_map(FieldValue::Bool),
            any::<i64>().prop_map(FieldValue::Int),
            "[ -~]{0,24}".prop_map(FieldValue::Text),
        ]
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertion helpers for GRIDEDIT results.

    use super::*;

    /// Assert that a GridResult is a BadRequest grid error.
    #[track_caller]
    pub fn assert_bad_request<T: std::fmt::Debug>(result: &GridResult<T>) {
        match result {
            Err(GridEditError::Grid(GridError::BadRequest { .. })) => {}
            other => panic!("Expected BadRequest error, got: {:?}", other),
        }
    }

    /// Assert that a GridResult is a RecordNotFound grid error for `id`.
    #[track_caller]
    pub fn assert_record_not_found<T: std::fmt::Debug>(result: &GridResult<T>, id: &str) {
        match result {
            Err(GridEditError::Grid(GridError::RecordNotFound { id: got })) => {
                assert_eq!(got, id, "Wrong id in RecordNotFound error");
            }
            other => panic!("Expected RecordNotFound error for {}, got: {:?}", id, other),
        }
    }

    /// Assert that a GridResult is a configuration error of any kind.
    #[track_caller]
    pub fn assert_config_error<T: std::fmt::Debug>(result: &GridResult<T>) {
        match result {
            Err(GridEditError::Config(_)) | Err(GridEditError::Grid(GridError::InvalidField { .. })) => {}
            other => panic!("Expected configuration error, got: {:?}", other),
        }
    }
}
