use sea_orm::{DbErr, SqlErr};

/// Errors raised while managing the connection itself
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] DbErr),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Coarse classification of a storage failure.
///
/// Domain crates use this to decide between a 4xx answer (the data forbids
/// the write) and a 5xx answer (the store could not be reached).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbErrKind {
    /// Pool exhausted or connection lost; the caller may retry
    Unavailable,
    /// A unique index rejected the write
    UniqueViolation(String),
    /// A foreign key rejected the write
    ForeignKeyViolation(String),
    Other,
}

pub fn classify_db_err(err: &DbErr) -> DbErrKind {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => DbErrKind::Unavailable,
        _ => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => DbErrKind::UniqueViolation(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                DbErrKind::ForeignKeyViolation(detail)
            }
            _ => DbErrKind::Other,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnAcquireErr, RuntimeErr};

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let err = DbErr::ConnectionAcquire(ConnAcquireErr::Timeout);
        assert_eq!(classify_db_err(&err), DbErrKind::Unavailable);
    }

    #[test]
    fn test_lost_connection_is_unavailable() {
        let err = DbErr::Conn(RuntimeErr::Internal("connection reset".into()));
        assert_eq!(classify_db_err(&err), DbErrKind::Unavailable);
    }

    #[test]
    fn test_custom_error_is_other() {
        let err = DbErr::Custom("boom".into());
        assert_eq!(classify_db_err(&err), DbErrKind::Other);
    }
}
