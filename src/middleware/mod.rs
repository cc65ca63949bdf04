pub mod error;
pub mod request_id;

pub use error::error_handling_middleware;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
