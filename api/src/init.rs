use axum::{Json, Router, routing::get};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use app::config::Config;
use app::state::AppState;

use crate::openapi::ApiDoc;
use crate::routers::create_router;

pub fn setup_router(config: Config, conn: DatabaseConnection) -> Router {
    create_router(AppState { conn, config })
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .layer(TraceLayer::new_for_http())
}

pub fn setup_config() -> Config {
    dotenvy::dotenv().ok();
    Config::from_env()
}

pub async fn setup_db(db_url: &str) -> DatabaseConnection {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_lifetime(std::time::Duration::from_secs(60))
        .min_connections(1)
        .max_connections(10);

    Database::connect(opt)
        .await
        .expect("Database connection failed")
}
