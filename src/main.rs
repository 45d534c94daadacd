use axum::{routing::get, Extension, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod config;
mod database;
mod error;
mod handlers;

use config::AppConfig;
use database::DocumentStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up MONGO_HOST, MONGO_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("MongoDB: {}:{}", config.storage.host, config.storage.port);

    // Connection failure is fatal at startup; there is no retry or
    // degraded mode.
    let store = match DocumentStore::connect(&config.storage).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("MongoDB connection failed: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = store.health_check().await {
        tracing::error!("MongoDB ping failed: {}", e);
        std::process::exit(1);
    }
    tracing::info!("MongoDB connected successfully");

    let app = app(store);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Docstore API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(store: DocumentStore) -> Router {
    Router::new()
        .route("/", get(handlers::root::index))
        .route("/health", get(handlers::root::health))
        .route("/data", get(handlers::data::list).post(handlers::data::insert))
        // Global middleware
        .layer(Extension(store))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
