use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::errors::{AppError, Result};
use crate::services::routes_service;
use crate::AppState;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
}

// GET /flights/search?origin&destination&date?
pub async fn get_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response> {
    let (Some(origin), Some(destination)) = (query.origin, query.destination) else {
        return Err(AppError::validation("Origin and destination are required"));
    };

    let strict = state.settings.strict_airport_codes;
    let origin = routes_service::normalize_place(&origin, strict)?;
    let destination = routes_service::normalize_place(&destination, strict)?;

    let date = match query.date.as_deref() {
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| AppError::validation("date must be YYYY-MM-DD"))?,
        ),
        None => None,
    };

    let flights = state.lookup.search(&origin, &destination, date).await?;

    Ok(Json(json!({
        "success": true,
        "flights": flights,
        "message": format!("Found {} flights", flights.len()),
    }))
    .into_response())
}
