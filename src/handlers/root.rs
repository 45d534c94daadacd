use axum::{extract::Extension, response::Json};
use serde_json::{json, Value};

use crate::database::DocumentStore;
use crate::error::ApiError;

/// GET / - Plain-text welcome with the current server time
pub async fn index() -> String {
    format!(
        "Welcome to the Docstore API! The current time is: {}",
        chrono::Utc::now()
    )
}

/// GET /health - Liveness probe with a database ping
pub async fn health(
    Extension(store): Extension<DocumentStore>,
) -> Result<Json<Value>, ApiError> {
    if let Err(e) = store.health_check().await {
        tracing::error!("MongoDB health check failed: {}", e);
        return Err(ApiError::service_unavailable("database unavailable"));
    }

    Ok(Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "database": "ok"
    })))
}
