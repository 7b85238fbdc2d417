use chrono::Utc;
use futures_util::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::FindOptions;

use crate::errors::Result;
use crate::models::PriceObservation;
use crate::AppState;

/// Appends one observation to the price history. The log is append-only;
/// nothing here updates or removes existing records.
pub async fn record_observation(
    state: &AppState,
    route_id: ObjectId,
    price: f64,
    airline: &str,
    flight_number: &str,
) -> Result<PriceObservation> {
    let history = state.db.collection::<PriceObservation>("price_history");

    let observation = PriceObservation {
        id: ObjectId::new(),
        route_id,
        price,
        airline: airline.to_string(),
        flight_number: flight_number.to_string(),
        observed_at: Utc::now().timestamp(),
    };

    history.insert_one(&observation, None).await?;

    Ok(observation)
}

pub async fn recent_for_route(
    state: &AppState,
    route_id: ObjectId,
    limit: i64,
) -> Result<Vec<PriceObservation>> {
    let history = state.db.collection::<PriceObservation>("price_history");

    let find_opts = FindOptions::builder()
        .sort(doc! { "observed_at": -1 })
        .limit(limit)
        .build();

    let mut cursor = history.find(doc! { "route_id": route_id }, find_opts).await?;

    let mut items: Vec<PriceObservation> = Vec::new();
    while let Some(res) = cursor.next().await {
        items.push(res?);
    }

    Ok(items)
}
