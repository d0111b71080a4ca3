//! Task-list command model.

/// Structured form of a `todo ...` text line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show every task.
    List,
    /// Create a task.
    Add {
        /// Task title.
        title: String,
        /// Free-form due date as typed (e.g. `2/24`).
        due_date: String,
    },
    /// Remove a task by identifier.
    Done {
        /// Store-assigned task identifier.
        id: u64,
    },
    /// Anything the parser could not make sense of.
    Unrecognized,
}
