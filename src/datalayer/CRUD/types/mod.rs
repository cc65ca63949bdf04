pub mod types;

pub use types::{Product, ProductRow};
