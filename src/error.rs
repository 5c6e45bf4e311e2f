use thiserror::Error;

/// Errors reported by the command layer and the binary.
///
/// The store itself never fails: operations on unknown ids are no-ops. The
/// command layer turns those no-ops into the not-found variants below so the
/// user gets feedback.
#[derive(Debug, Error)]
pub enum Error {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("invalid date '{0}': use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid time '{0}': use a form like 7am or 12pm")]
    InvalidTime(String),

    #[error("role {0} not found")]
    RoleNotFound(String),

    #[error("goal {0} not found")]
    GoalNotFound(String),

    #[error("task {0} not found")]
    TaskNotFound(String),

    #[error("logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
