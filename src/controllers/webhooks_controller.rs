use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::json;

use crate::errors::{AppError, Result};
use crate::services::{price_checker, routes_service};
use crate::AppState;

#[derive(Deserialize)]
pub struct FlightPriceWebhook {
    pub route_id: String,
    pub price: f64,
    pub airline: String,
    pub flight_number: String,
}

// POST /webhooks/flight-prices (push-style ingestion from an external
// price feed; alternate door into the same write+evaluate core the cron
// cycle uses)
pub async fn post_flight_prices(
    State(state): State<AppState>,
    Json(body): Json<FlightPriceWebhook>,
) -> Result<Response> {
    let route_id = ObjectId::parse_str(&body.route_id)
        .map_err(|_| AppError::validation("route_id is not a valid id"))?;

    if !body.price.is_finite() || body.price <= 0.0 {
        return Err(AppError::validation("price must be a positive number"));
    }

    let route = routes_service::get_route(&state, route_id)
        .await?
        .ok_or_else(|| AppError::validation("unknown route_id"))?;

    let (observation, triggered) = price_checker::record_and_evaluate(
        &state,
        route.id,
        body.price,
        &body.airline,
        &body.flight_number,
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "priceHistory": {
            "id": observation.id.to_hex(),
            "route_id": observation.route_id.to_hex(),
            "price": observation.price,
            "airline": observation.airline,
            "flight_number": observation.flight_number,
            "observed_at": observation.observed_at,
        },
        "triggeredAlerts": triggered.len(),
    }))
    .into_response())
}
