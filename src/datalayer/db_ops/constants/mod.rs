pub mod constants;
pub mod types;
pub use constants::{DATABASE_URL_ENV, PRODUCT_TABLE};
pub use types::{ConnectionState, DbConfig};
