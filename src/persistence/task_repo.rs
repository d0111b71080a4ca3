//! Task list repository for `SQLite` persistence.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::models::task::Task;
use crate::{AppError, Result};

use super::db::Database;
use super::TaskStore;

/// Repository for task records.
#[derive(Clone)]
pub struct TaskRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i64,
    todo: String,
    due_date: String,
}

impl TaskRow {
    fn into_task(self) -> Result<Task> {
        let id = u64::try_from(self.id)
            .map_err(|_| AppError::Db(format!("invalid task id: {}", self.id)))?;
        Ok(Task {
            id,
            title: self.todo,
            due_date: self.due_date,
        })
    }
}

impl TaskRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Fetch every task in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Task>> {
        let rows: Vec<TaskRow> =
            sqlx::query_as("SELECT id, todo, due_date FROM tasks ORDER BY id ASC")
                .fetch_all(self.db.as_ref())
                .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    /// Insert a task and return the identifier the database assigned.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert fails.
    pub async fn insert(&self, title: &str, due_date: &str) -> Result<u64> {
        let result = sqlx::query("INSERT INTO tasks (todo, due_date) VALUES (?1, ?2)")
            .bind(title)
            .bind(due_date)
            .execute(self.db.as_ref())
            .await?;

        let id = result.last_insert_rowid();
        u64::try_from(id).map_err(|_| AppError::Db(format!("invalid inserted id: {id}")))
    }

    /// Delete a task by identifier.
    ///
    /// The affected row count is discarded: deleting an unknown id succeeds.
    /// Ids beyond the database integer range can never name a row and are
    /// treated the same way.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn delete_by_id(&self, id: u64) -> Result<()> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(());
        };
        sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id)
            .execute(self.db.as_ref())
            .await?;
        Ok(())
    }
}

impl TaskStore for TaskRepo {
    fn list_all(&self) -> Pin<Box<dyn Future<Output = Result<Vec<Task>>> + Send + '_>> {
        Box::pin(TaskRepo::list_all(self))
    }

    fn insert<'a>(
        &'a self,
        title: &'a str,
        due_date: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<u64>> + Send + 'a>> {
        Box::pin(TaskRepo::insert(self, title, due_date))
    }

    fn delete_by_id(&self, id: u64) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(TaskRepo::delete_by_id(self, id))
    }
}
