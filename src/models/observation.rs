use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One durable record of an observed price at a point in time.
/// Append-only; never mutated or deleted outside a route cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceObservation {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub route_id: ObjectId,

    pub price: f64,
    pub airline: String,
    pub flight_number: String,

    pub observed_at: i64,
}
