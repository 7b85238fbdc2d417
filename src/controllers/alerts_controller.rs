use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::{AppError, Result};
use crate::models::{Alert, Route, DEFAULT_USER_ID};
use crate::services::{alerts_service, history_service, routes_service};
use crate::AppState;

#[derive(Deserialize)]
pub struct CreateAlertBody {
    pub origin: String,
    pub destination: String,

    // Number or string; the web form posts strings.
    #[serde(rename = "targetPrice")]
    pub target_price: Value,

    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
}

fn alert_json(alert: &Alert, route: &Route) -> Value {
    json!({
        "id": alert.id.to_hex(),
        "route_id": alert.route_id.to_hex(),
        "user_id": alert.user_id,
        "target_price": alert.target_price,
        "is_active": alert.is_active,
        "created_at": alert.created_at,
        "route": {
            "id": route.id.to_hex(),
            "origin": route.origin,
            "destination": route.destination,
            "user_id": route.user_id,
        },
    })
}

// POST /alerts
pub async fn post_create_alert(
    State(state): State<AppState>,
    Json(body): Json<CreateAlertBody>,
) -> Result<Response> {
    let user_id = body.user_id.as_deref().unwrap_or(DEFAULT_USER_ID);

    // Everything is validated before the route upsert so a malformed alert
    // leaves no record behind at all.
    let target_price = alerts_service::parse_target_price(&body.target_price)?;

    let route = routes_service::ensure_route(&state, &body.origin, &body.destination, user_id)
        .await?;

    let alert = alerts_service::create_alert(&state, route.id, target_price, user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "alert": alert_json(&alert, &route) })),
    )
        .into_response())
}

// GET /routes/:id/price-history
pub async fn get_route_price_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let oid = ObjectId::parse_str(&id)
        .map_err(|_| AppError::validation("route id is not a valid id"))?;

    let route = routes_service::get_route(&state, oid)
        .await?
        .ok_or_else(|| AppError::validation("unknown route id"))?;

    let observations = history_service::recent_for_route(&state, route.id, 30).await?;

    let history: Vec<Value> = observations
        .iter()
        .map(|o| {
            json!({
                "id": o.id.to_hex(),
                "price": o.price,
                "airline": o.airline,
                "flight_number": o.flight_number,
                "observed_at": o.observed_at,
            })
        })
        .collect();

    Ok(Json(json!({
        "success": true,
        "route": {
            "id": route.id.to_hex(),
            "origin": route.origin,
            "destination": route.destination,
        },
        "history": history,
    }))
    .into_response())
}

// DELETE /routes/:id (removes the route and everything it owns)
pub async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let oid = ObjectId::parse_str(&id)
        .map_err(|_| AppError::validation("route id is not a valid id"))?;

    routes_service::delete_route(&state, oid).await?;

    Ok(Json(json!({ "success": true })).into_response())
}

// POST /alerts/:id/deactivate
pub async fn post_deactivate_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let oid = ObjectId::parse_str(&id)
        .map_err(|_| AppError::validation("alert id is not a valid id"))?;

    alerts_service::deactivate(&state, oid).await?;

    Ok(Json(json!({ "success": true })).into_response())
}
