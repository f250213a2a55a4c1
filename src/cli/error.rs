// Error classification for consistent messages and exit codes

use crate::repo::StoreError;

/// A problem with what the user asked for (exit code 1)
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct UserError(pub String);

impl UserError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Internal errors are storage or I/O failures rather than bad input (exit code 2)
pub fn is_internal(err: &anyhow::Error) -> bool {
    if err.chain().any(|cause| cause.is::<UserError>()) {
        return false;
    }
    err.chain().any(|cause| {
        cause.is::<StoreError>() || cause.is::<rusqlite::Error>() || cause.is::<std::io::Error>()
    })
}

/// Exit code for an error returned from `run`
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if is_internal(err) {
        2
    } else {
        1
    }
}

/// Parse a task ID. Any integer is accepted; unknown IDs are handled by the caller.
pub fn validate_task_id(id_str: &str) -> Result<i64, UserError> {
    id_str.trim().parse::<i64>()
        .map_err(|_| UserError(format!("Invalid task ID: '{}'. Task ID must be a number.", id_str)))
}
