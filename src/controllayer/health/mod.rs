pub mod health;

pub use health::{
    DatabaseStatus, HealthResponse, ROOT_MESSAGE, RootResponse, health_check, liveness, readiness,
    root,
};
