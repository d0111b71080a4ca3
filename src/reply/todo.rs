//! Task-list command parsing and execution.

use std::time::Duration;

use tracing::{error, info};

use crate::models::command::Command;
use crate::persistence::TaskStore;
use crate::{AppError, Result};

use super::{with_timeout, HELP_MESSAGE};

/// Text prefix routing a message to the task list.
pub const TODO_PREFIX: &str = "todo";

/// Header line of the list reply.
pub const LIST_HEADER: &str = "ID/Task/DueDate";

/// Parse a raw `todo ...` line.
///
/// Tokens are split on single spaces. The first token is the feature
/// prefix and is not inspected here.
#[must_use]
pub fn parse_command(line: &str) -> Command {
    let tokens: Vec<&str> = line.split(' ').collect();
    let Some(verb) = tokens.get(1) else {
        return Command::Unrecognized;
    };

    match *verb {
        "list" => Command::List,
        "add" => match (tokens.get(2), tokens.get(3)) {
            (Some(title), Some(due_date)) => Command::Add {
                title: (*title).to_owned(),
                due_date: (*due_date).to_owned(),
            },
            _ => Command::Unrecognized,
        },
        "done" => tokens
            .get(2)
            .and_then(|raw| raw.parse::<u64>().ok())
            .map_or(Command::Unrecognized, |id| Command::Done { id }),
        _ => Command::Unrecognized,
    }
}

/// Run `command` against `store` and render the reply text.
///
/// Store failures are rendered as `db error: <detail>`; the detail is
/// shown to the user as-is. Timeouts keep their `timeout:` kind.
pub async fn execute(command: Command, store: &dyn TaskStore, budget: Duration) -> String {
    match run(command, store, budget).await {
        Ok(text) => text,
        Err(err) => {
            error!(%err, "task store operation failed");
            match err {
                AppError::Db(detail) => format!("db error: {detail}"),
                other => format!("db error: {other}"),
            }
        }
    }
}

async fn run(command: Command, store: &dyn TaskStore, budget: Duration) -> Result<String> {
    match command {
        Command::List => {
            let tasks = with_timeout("task store", budget, store.list_all()).await?;
            let lines = std::iter::once(LIST_HEADER.to_owned())
                .chain(
                    tasks
                        .iter()
                        .map(|task| format!("{}/{}/{}", task.id, task.title, task.due_date)),
                )
                .collect::<Vec<_>>();
            Ok(lines.join("\n"))
        }
        Command::Add { title, due_date } => {
            let id = with_timeout("task store", budget, store.insert(&title, &due_date)).await?;
            info!(task_id = id, "task added");
            Ok(format!("todo added\nID:{id}\ntodo:{title}\ndue:{due_date}"))
        }
        Command::Done { id } => {
            // The store does not report whether `id` existed.
            with_timeout("task store", budget, store.delete_by_id(id)).await?;
            info!(task_id = id, "task deleted");
            Ok(format!("todo deleted\nID:{id}"))
        }
        Command::Unrecognized => Ok(HELP_MESSAGE.to_owned()),
    }
}
