pub mod helper;
pub mod products;
pub mod types;
