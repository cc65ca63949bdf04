pub mod connection_pool;
pub mod constants;
pub mod db_health;
pub mod db_ops;

pub use constants::{ConnectionState, DbConfig};
pub use db_health::{PoolHealth, check_database_health, check_table_exists};
pub use db_ops::{DbManager, initialize_database};
