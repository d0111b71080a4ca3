//! Persistent task record.

use serde::{Deserialize, Serialize};

/// A task-list entry as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Identifier assigned by the store on insert.
    pub id: u64,
    /// Task title.
    pub title: String,
    /// Free-form due date.
    pub due_date: String,
}
