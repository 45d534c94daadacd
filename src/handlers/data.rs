use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::Json,
};
use bson::{Bson, Document};
use serde_json::{json, Value};

use crate::database::DocumentStore;
use crate::error::ApiError;

/// GET /data - List all stored documents
pub async fn list(
    Extension(store): Extension<DocumentStore>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let documents = store.find_all().await?;

    let data = documents.into_iter().map(to_api_output).collect();
    Ok(Json(data))
}

/// POST /data - Insert one JSON document
pub async fn insert(
    Extension(store): Extension<DocumentStore>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    // Reject absent or malformed bodies rather than persisting garbage
    let Json(document) = payload.map_err(|_| ApiError::invalid_json("invalid body"))?;

    if !document.is_object() {
        return Err(ApiError::bad_request("request body must be a JSON object"));
    }

    store.insert(&document).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "Data inserted" })),
    ))
}

/// Strip the internal identifier and convert back to plain JSON. Documents
/// entered the store as JSON objects, so relaxed extended JSON round-trips
/// them unchanged.
fn to_api_output(mut document: Document) -> Value {
    document.remove("_id");
    Bson::Document(document).into_relaxed_extjson()
}
