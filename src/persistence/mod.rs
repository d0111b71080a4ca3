//! Persistence layer modules.

use std::future::Future;
use std::pin::Pin;

use crate::models::task::Task;
use crate::Result;

pub mod db;
pub mod schema;
pub mod task_repo;

/// Re-export the database pool type for convenience.
pub use sqlx::SqlitePool;

/// Storage seam for the task list.
///
/// The dispatcher only talks to this trait, so tests can substitute an
/// in-memory fake for [`task_repo::TaskRepo`].
pub trait TaskStore: Send + Sync {
    /// Every task, in the store's natural order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the read fails.
    fn list_all(&self) -> Pin<Box<dyn Future<Output = Result<Vec<Task>>> + Send + '_>>;

    /// Persist a new task and return its store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the write fails.
    fn insert<'a>(
        &'a self,
        title: &'a str,
        due_date: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<u64>> + Send + 'a>>;

    /// Remove a task. Unknown identifiers are not reported.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the write fails.
    fn delete_by_id(&self, id: u64) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}
