use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::doc;
use serde_json::json;

use crate::AppState;

// GET /health
pub async fn health() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}

// GET /health/db
pub async fn health_db(State(state): State<AppState>) -> Response {
    match state.db.run_command(doc! { "ping": 1 }, None).await {
        Ok(_) => Json(json!({ "status": "ok", "db": "up" })).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "error", "db": "down", "details": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "error": "Not Found" })),
    )
        .into_response()
}
