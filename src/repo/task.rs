use rusqlite::Connection;
use crate::models::{Task, TaskList};
use crate::repo::kv::{KvRepo, StoreError};

/// Key holding the JSON array of tasks
pub const TASKS_KEY: &str = "focusflow-tasks";

/// Persistence for the task list
pub struct TaskRepo;

impl TaskRepo {
    /// Load the stored list. Missing or malformed data yields an empty list.
    pub fn load(conn: &Connection) -> Result<TaskList, StoreError> {
        let tasks: Vec<Task> = KvRepo::get_json(conn, TASKS_KEY)?.unwrap_or_default();
        log::debug!("Loaded {} task(s)", tasks.len());
        Ok(TaskList::from_tasks(tasks))
    }

    /// Write the full list
    pub fn save(conn: &Connection, list: &TaskList) -> Result<(), StoreError> {
        KvRepo::set_json(conn, TASKS_KEY, list.tasks())?;
        log::debug!("Saved {} task(s)", list.len());
        Ok(())
    }
}
