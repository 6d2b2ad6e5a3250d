//! Built-in task grid served when no grid configuration file is given.

use std::sync::Arc;

use gridedit_core::{ColumnType, GridConfig, GridResult, Record, RecordId, Schema};
use gridedit_storage::InMemoryRepository;

use crate::error::{ApiError, ApiResult};

/// Grid configuration of the demo task list.
pub const DEMO_GRID_TOML: &str = r#"
name = "Tasks"
link = "/tasks"

[columns.Title]
title = "Task"

[columns.Notes]
field = "textarea"

[columns.Done]

[columns.Estimate]
title = "Estimate (h)"

[columns.Due]

[columns.Priority]

[casting]
Title = { limit_characters = 80 }
"#;

/// Record that is shown but may not be edited.
pub const DEMO_LOCKED_ID: RecordId = RecordId(4);

pub fn demo_schema() -> Schema {
    Schema::new()
        .column("Title", ColumnType::Varchar)
        .column("Notes", ColumnType::Text)
        .column("Done", ColumnType::Boolean)
        .column("Estimate", ColumnType::Decimal)
        .column("Due", ColumnType::Date)
        .column(
            "Priority",
            ColumnType::Enum(vec!["Low".to_string(), "Normal".to_string(), "High".to_string()]),
        )
}

pub fn demo_grid_config() -> ApiResult<GridConfig> {
    GridConfig::from_toml_str(DEMO_GRID_TOML)
        .map_err(|e| ApiError::configuration_error(e.to_string()))
}

/// In-memory repository seeded with a handful of tasks, one of them locked.
pub fn demo_repository() -> GridResult<Arc<InMemoryRepository>> {
    let tasks = [
        (1, "Draft release notes", "Cover the new row form", false, 2.0, "2026-11-02", "High"),
        (2, "Review grid styling", "", true, 0.5, "2026-10-20", "Normal"),
        (3, "Triage storage bugs", "Start with write failures", false, 4.0, "2026-11-15", "Normal"),
        (4, "Archive 2025 records", "Locked until audit sign-off", false, 1.5, "2026-12-01", "Low"),
    ];

    let records = tasks
        .into_iter()
        .map(|(id, title, notes, done, estimate, due, priority)| {
            Record::new(id)
                .with("Title", title)
                .with("Notes", notes)
                .with("Done", done)
                .with("Estimate", estimate)
                .with("Due", due)
                .with("Priority", priority)
        });

    let repository = InMemoryRepository::new(demo_schema()).with_records(records)?;
    repository.lock(DEMO_LOCKED_ID)?;
    Ok(Arc::new(repository))
}
