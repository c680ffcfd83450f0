use core_types::CoreError;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("The database is unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("A database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Rejected input: {0}")]
    InvalidInput(#[from] CoreError),

    #[error("Column {column} holds a value that could not be decoded: {value}")]
    DecodeError { column: &'static str, value: String },

    #[error("No {entity} with id {id} exists in the database.")]
    NotFound { entity: &'static str, id: Uuid },
}

/// The three kinds of storage failure callers can tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server could not be reached or refused the session.
    Unavailable,
    /// A uniqueness, foreign-key, check or not-null rule rejected the write,
    /// or the referenced row does not exist.
    Constraint,
    /// Anything else that went wrong while running a statement.
    Query,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureKind::Unavailable => "unavailable",
            FailureKind::Constraint => "constraint",
            FailureKind::Query => "query",
        })
    }
}

impl DbError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DbError::Unavailable(_) => FailureKind::Unavailable,
            DbError::QueryError(e) => classify(e),
            DbError::MigrationError(sqlx::migrate::MigrateError::Execute(e)) => classify(e),
            DbError::MigrationError(_) => FailureKind::Query,
            DbError::InvalidInput(_) | DbError::NotFound { .. } => FailureKind::Constraint,
            DbError::DecodeError { .. } => FailureKind::Query,
        }
    }

    /// Only an unavailable server is worth retrying; every other failure
    /// will repeat with the same input.
    pub fn is_retryable(&self) -> bool {
        self.kind() == FailureKind::Unavailable
    }
}

pub(crate) fn classify(error: &sqlx::Error) -> FailureKind {
    match error {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::Configuration(_) => FailureKind::Unavailable,
        sqlx::Error::Database(db) => match db.kind() {
            sqlx::error::ErrorKind::UniqueViolation
            | sqlx::error::ErrorKind::ForeignKeyViolation
            | sqlx::error::ErrorKind::NotNullViolation
            | sqlx::error::ErrorKind::CheckViolation => FailureKind::Constraint,
            _ => db
                .code()
                .map(|code| classify_sqlstate(&code))
                .unwrap_or(FailureKind::Query),
        },
        _ => FailureKind::Query,
    }
}

/// Maps a PostgreSQL SQLSTATE to a failure kind by its class.
pub(crate) fn classify_sqlstate(code: &str) -> FailureKind {
    match code.get(..2) {
        // connection exception, invalid authorization, unknown database,
        // insufficient resources
        Some("08") | Some("28") | Some("3D") | Some("53") => FailureKind::Unavailable,
        // admin shutdown, crash shutdown, cannot connect now
        Some("57") if code.starts_with("57P") => FailureKind::Unavailable,
        Some("23") => FailureKind::Constraint,
        _ => FailureKind::Query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlstate_classes_map_to_kinds() {
        assert_eq!(classify_sqlstate("08006"), FailureKind::Unavailable);
        assert_eq!(classify_sqlstate("28P01"), FailureKind::Unavailable);
        assert_eq!(classify_sqlstate("3D000"), FailureKind::Unavailable);
        assert_eq!(classify_sqlstate("57P01"), FailureKind::Unavailable);
        assert_eq!(classify_sqlstate("23505"), FailureKind::Constraint);
        assert_eq!(classify_sqlstate("23503"), FailureKind::Constraint);
        assert_eq!(classify_sqlstate("42P01"), FailureKind::Query);
        assert_eq!(classify_sqlstate("57014"), FailureKind::Query);
        assert_eq!(classify_sqlstate(""), FailureKind::Query);
    }

    #[test]
    fn pool_failures_are_retryable() {
        let err = DbError::QueryError(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), FailureKind::Unavailable);
        assert!(err.is_retryable());

        let err = DbError::Unavailable(sqlx::Error::PoolClosed);
        assert!(err.is_retryable());
    }

    #[test]
    fn decode_and_missing_rows_are_not_retryable() {
        let err = DbError::QueryError(sqlx::Error::RowNotFound);
        assert_eq!(err.kind(), FailureKind::Query);
        assert!(!err.is_retryable());

        let err = DbError::NotFound { entity: "campaign", id: Uuid::nil() };
        assert_eq!(err.kind(), FailureKind::Constraint);
        assert!(!err.is_retryable());
    }

    #[test]
    fn rejected_input_is_a_constraint_failure() {
        let err = DbError::from(CoreError::InvalidInput("budget".into(), "negative".into()));
        assert_eq!(err.kind(), FailureKind::Constraint);
    }
}
