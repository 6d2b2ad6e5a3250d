//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use gridedit_columns::EditableGrid;

/// Application-wide state shared across all routes.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The grid served by this process.
    pub grid: Arc<EditableGrid>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(grid: EditableGrid) -> Self {
        Self {
            grid: Arc::new(grid),
            start_time: Instant::now(),
        }
    }
}

crate::impl_from_ref!(Arc<EditableGrid>, grid);
