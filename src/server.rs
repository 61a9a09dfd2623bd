use std::sync::Arc;

use api::{setup_config, setup_db, setup_router};
use app::config::SYNC_INTERVAL;
use app::scheduler::SyncScheduler;
use app::sync::{LichessClient, Synchronizer};
use utils::{create_dev_db, migrate};

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

pub async fn run() {
    let config = setup_config();

    create_dev_db(&config.db_url);
    let conn = setup_db(&config.db_url).await;
    migrate(&conn).await.expect("Migration failed!");

    let source = LichessClient::new(config.broadcast_api_url.clone())
        .expect("Failed to build broadcast API client");
    let synchronizer = Arc::new(Synchronizer::new(
        Arc::new(source),
        conn.clone(),
        config.import_policy,
    ));
    let scheduler = SyncScheduler::start(synchronizer, SYNC_INTERVAL);

    let router = setup_router(config.clone(), conn.clone());

    let listener = tokio::net::TcpListener::bind(config.get_server_url())
        .await
        .expect("bind to port");
    tracing::info!(
        "Server running on http://{}",
        listener.local_addr().expect("listener has an address")
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("start server");

    scheduler.shutdown().await;
    if let Err(e) = conn.close().await {
        tracing::error!("Failed to close database connection: {}", e);
    }
}
