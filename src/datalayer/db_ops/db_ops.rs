/*
Connection lifecycle manager.

The manager owns the only database handle of the process. It is created empty at
startup, connected once, shared with every handler through AppState and closed on
shutdown. A failed connect is never retried: the process keeps serving in a degraded
mode where every product route answers 500.

The handle is a bounded sqlx PgPool rather than one raw connection. A single
connection shared by concurrent tasks lets their queries interleave on the wire and
corrupt each other; the pool hands every in-flight statement its own connection.
*/
use crate::datalayer::db_ops::constants::{ConnectionState, DbConfig, PRODUCT_TABLE};
use crate::datalayer::db_ops::db_health::{PoolHealth, check_database_health, check_table_exists};
use crate::errors::DbError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

enum Slot {
    Uninitialized,
    Connected(PgPool),
    Failed,
    Closed,
}

impl Slot {
    fn state(&self) -> ConnectionState {
        match self {
            Slot::Uninitialized => ConnectionState::Uninitialized,
            Slot::Connected(_) => ConnectionState::Connected,
            Slot::Failed => ConnectionState::Failed,
            Slot::Closed => ConnectionState::Closed,
        }
    }
}

struct Inner {
    slot: RwLock<Slot>,
    // Serializes startup/shutdown; never held by request handlers.
    transition: Mutex<()>,
}

/// Database connection manager shared across all handlers
#[derive(Clone)]
pub struct DbManager {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for DbManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbManager")
            .field("state", &self.state())
            .finish()
    }
}

impl Default for DbManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DbManager {
    /// Creates a manager with no connection yet
    pub fn new() -> Self {
        Self::with_slot(Slot::Uninitialized)
    }

    /// Wraps an already established pool, skipping `startup`
    pub fn from_pool(pool: PgPool) -> Self {
        Self::with_slot(Slot::Connected(pool))
    }

    fn with_slot(slot: Slot) -> Self {
        Self {
            inner: Arc::new(Inner {
                slot: RwLock::new(slot),
                transition: Mutex::new(()),
            }),
        }
    }

    fn read_slot(&self) -> RwLockReadGuard<'_, Slot> {
        self.inner
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn replace_slot(&self, slot: Slot) -> Slot {
        let mut guard = self
            .inner
            .slot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, slot)
    }

    /// Opens the database connection pool
    ///
    /// Only acts from `Uninitialized`. A connect error is logged and leaves the manager
    /// `Failed`; the caller keeps running.
    #[instrument(skip_all, fields(service = "DbManager"))]
    pub async fn startup(&self, config: &DbConfig) -> ConnectionState {
        let _transition = self.inner.transition.lock().await;

        let current = self.state();
        if current != ConnectionState::Uninitialized {
            warn!(state = %current, "Startup requested again, reconnecting is not supported");
            return current;
        }

        info!(?config, "Connecting to the database...");

        match connect(config).await {
            Ok(pool) => {
                info!(
                    pool_size = pool.size(),
                    idle = pool.num_idle(),
                    "Connected to the database"
                );
                report_product_table(&pool).await;
                self.replace_slot(Slot::Connected(pool));
            }
            Err(e) => {
                error!(error = %e, "Failed to connect to the database, serving without a connection");
                self.replace_slot(Slot::Failed);
            }
        }

        self.state()
    }

    /// Closes the pool if one exists
    ///
    /// Safe to call in any state and more than once; always ends in `Closed`.
    #[instrument(skip_all, fields(service = "DbManager"))]
    pub async fn shutdown(&self) {
        let _transition = self.inner.transition.lock().await;

        match self.replace_slot(Slot::Closed) {
            Slot::Connected(pool) => {
                info!("Closing database connection pool...");
                pool.close().await;
                info!("Database connection closed");
            }
            Slot::Closed => debug!("Database connection already closed"),
            other => warn!(
                state = %other.state(),
                "Shutdown without an established connection, nothing to close"
            ),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ConnectionState {
        self.read_slot().state()
    }

    /// Whether a usable connection currently exists
    pub fn is_available(&self) -> bool {
        matches!(&*self.read_slot(), Slot::Connected(pool) if !pool.is_closed())
    }

    /// Handle for issuing one statement. Cloning a PgPool only bumps a refcount.
    pub fn pool(&self) -> Result<PgPool, DbError> {
        match &*self.read_slot() {
            Slot::Connected(pool) if !pool.is_closed() => Ok(pool.clone()),
            _ => Err(DbError::NotConnected),
        }
    }

    /// Pings the database and reports pool statistics
    pub async fn health_check(&self) -> Result<PoolHealth, DbError> {
        let pool = self.pool()?;
        Ok(check_database_health(&pool).await?)
    }
}

async fn connect(config: &DbConfig) -> Result<PgPool, DbError> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or(DbError::MissingDatabaseUrl)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connection_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect(database_url)
        .await?;

    Ok(pool)
}

// A missing table only degrades the product routes, so it is reported and not fatal.
async fn report_product_table(pool: &PgPool) {
    match check_table_exists(pool, PRODUCT_TABLE).await {
        Ok(true) => info!(table = PRODUCT_TABLE, "Product table found"),
        Ok(false) => warn!(
            table = PRODUCT_TABLE,
            "Product table does not exist, product routes will fail"
        ),
        Err(e) => warn!(error = %e, table = PRODUCT_TABLE, "Could not verify product table"),
    }
}

/// Initialize the database manager at application startup
pub async fn initialize_database(config: &DbConfig) -> DbManager {
    info!("=== Database Initialization Started ===");

    let manager = DbManager::new();
    let state = manager.startup(config).await;

    info!(state = %state, "=== Database Initialization Completed ===");

    manager
}
