use chrono::Utc;
use futures_util::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson};
use serde_json::Value;

use crate::errors::{AppError, Result};
use crate::models::{Alert, Route};
use crate::AppState;

/// Parses and validates a target price from request input. Web forms post
/// the price as a string, API clients send a JSON number; both are
/// accepted. Must be a positive finite amount with at most 2 decimal
/// places.
pub fn parse_target_price(raw: &Value) -> Result<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| AppError::validation("targetPrice must be a number"))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::validation("targetPrice must be a positive number"));
    }

    let cents = value * 100.0;
    if (cents - cents.round()).abs() > 1e-6 {
        return Err(AppError::validation(
            "targetPrice allows at most 2 decimal places",
        ));
    }

    Ok(value)
}

/// Inserts one alert for the route. Existing alerts on the same route are
/// left untouched; several concurrent alerts per route are allowed.
pub async fn create_alert(
    state: &AppState,
    route_id: ObjectId,
    target_price: f64,
    user_id: &str,
) -> Result<Alert> {
    let alerts = state.db.collection::<Alert>("alerts");
    let now = Utc::now().timestamp();

    let alert = Alert {
        id: ObjectId::new(),
        route_id,
        user_id: user_id.to_string(),
        target_price,
        is_active: true,
        created_at: now,
        triggered_at: None,
    };

    alerts.insert_one(&alert, None).await?;

    Ok(alert)
}

pub async fn list_active_alerts_for_route(
    state: &AppState,
    route_id: ObjectId,
) -> Result<Vec<Alert>> {
    let alerts = state.db.collection::<Alert>("alerts");

    let mut cursor = alerts
        .find(doc! { "route_id": route_id, "is_active": true }, None)
        .await?;

    let mut items: Vec<Alert> = Vec::new();
    while let Some(res) = cursor.next().await {
        items.push(res?);
    }

    Ok(items)
}

/// Idempotent; history stays intact.
pub async fn deactivate(state: &AppState, alert_id: ObjectId) -> Result<()> {
    let alerts = state.db.collection::<Alert>("alerts");

    alerts
        .update_one(
            doc! { "_id": alert_id },
            doc! { "$set": { "is_active": false } },
            None,
        )
        .await?;

    Ok(())
}

/// Stamps the trigger time and, under the fire-once policy, deactivates the
/// alert so it does not fire again next cycle.
pub async fn mark_triggered(
    state: &AppState,
    alert_id: ObjectId,
    deactivate: bool,
) -> Result<()> {
    let alerts = state.db.collection::<Alert>("alerts");
    let now = Utc::now().timestamp();

    let mut update = doc! { "triggered_at": now };
    if deactivate {
        update.insert("is_active", false);
    }

    alerts
        .update_one(doc! { "_id": alert_id }, doc! { "$set": update }, None)
        .await?;

    Ok(())
}

/// The cycle's work list: distinct routes that currently have at least one
/// active alert.
pub async fn routes_with_active_alerts(state: &AppState) -> Result<Vec<Route>> {
    let alerts = state.db.collection::<Alert>("alerts");

    let route_ids: Vec<Bson> = alerts
        .distinct("route_id", doc! { "is_active": true }, None)
        .await?;

    if route_ids.is_empty() {
        return Ok(Vec::new());
    }

    let routes = state.db.collection::<Route>("routes");
    let mut cursor = routes.find(doc! { "_id": { "$in": route_ids } }, None).await?;

    let mut items: Vec<Route> = Vec::new();
    while let Some(res) = cursor.next().await {
        items.push(res?);
    }

    Ok(items)
}
