pub mod coercion;
pub mod conversion;
