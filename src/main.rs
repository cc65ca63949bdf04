use productos_backend::{
    datalayer::{DbConfig, initialize_database},
    logging::{init_telemetry, shutdown_telemetry},
    routes::create_router,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables first
    dotenvy::dotenv().ok();

    init_telemetry(None)?;

    tracing::info!("Starting productos backend");

    // A failed connection is logged and the server still starts; product routes answer 500
    let db = initialize_database(&DbConfig::from_env()).await;

    let app = create_router(AppState::new(db.clone()));

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        address = %addr,
        database = %db.state(),
        "Server listening and ready to accept connections"
    );

    tracing::info!(
        endpoints = ?vec![
            "GET / - status message",
            "GET /productos - list products",
            "POST /productos - create product",
            "PUT /productos/:id - update product",
            "DELETE /productos/:id - delete product",
            "GET /health, /health/live, /health/ready - health checks",
        ],
        "Available API endpoints"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.shutdown().await;

    shutdown_telemetry();

    Ok(())
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::warn!("Shutdown signal received, cleaning up...");
}
