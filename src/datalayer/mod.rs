#[allow(non_snake_case)]
pub mod CRUD;
pub mod db_ops;

pub use db_ops::{ConnectionState, DbConfig, DbManager, PoolHealth, initialize_database};
