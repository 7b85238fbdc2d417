use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::errors::Result;
use crate::services::price_checker;
use crate::AppState;

// GET /cron/check-prices (invoked by an external scheduler)
pub async fn get_check_prices(State(state): State<AppState>) -> Result<Response> {
    let report = price_checker::run_price_check_cycle(&state).await?;

    Ok(Json(json!({ "success": true, "report": report })).into_response())
}
