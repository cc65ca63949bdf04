pub mod health;
pub mod productos;
