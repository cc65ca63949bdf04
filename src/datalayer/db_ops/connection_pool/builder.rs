use std::time::Duration;

use crate::datalayer::db_ops::constants::constants::{
    DATABASE_URL_ENV, DEFAULT_CONNECTION_TIMEOUT, DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_MAX_LIFETIME, DEFAULT_MIN_CONNECTIONS,
};
use crate::datalayer::db_ops::constants::DbConfig;

/*
Default configuration for the database connection pool.
- database_url: DATABASE_URL from the environment, absent when unset or empty
- max_connections: 10
- min_connections: 2
- connection_timeout: 30 seconds
- idle_timeout: 10 minutes
- max_lifetime: 30 minutes
*/
impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_url: std::env::var(DATABASE_URL_ENV)
                .ok()
                .filter(|url| !url.trim().is_empty()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            max_lifetime: DEFAULT_MAX_LIFETIME,
        }
    }
}

// Builder pattern for DbConfig
impl DbConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as `default()`, named for call sites that read the environment
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn set_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = Some(database_url.into());
        self
    }

    pub fn clear_database_url(mut self) -> Self {
        self.database_url = None;
        self
    }

    pub fn set_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn set_min_connections(mut self, min_connections: u32) -> Self {
        self.min_connections = min_connections;
        self
    }

    pub fn set_connection_timeout(mut self, connection_timeout: Duration) -> Self {
        self.connection_timeout = connection_timeout;
        self
    }

    pub fn set_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn set_max_lifetime(mut self, max_lifetime: Duration) -> Self {
        self.max_lifetime = max_lifetime;
        self
    }
}
