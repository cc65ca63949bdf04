use std::fmt;

/// Failures raised by the connection lifecycle manager
#[derive(Debug)]
pub enum DbError {
    MissingDatabaseUrl,
    ConnectionError(String),
    NotConnected,
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbError::MissingDatabaseUrl => write!(f, "DATABASE_URL is not set"),
            DbError::ConnectionError(msg) => write!(f, "Database connection error: {}", msg),
            DbError::NotConnected => write!(f, "Database connection is not established"),
        }
    }
}

impl std::error::Error for DbError {}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::ConnectionError(err.to_string())
    }
}
