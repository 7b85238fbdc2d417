use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A target price threshold attached to a Route.
///
/// A route may carry many alerts. Deactivation is a soft flag; price
/// history is never deleted when an alert goes inactive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub route_id: ObjectId,
    pub user_id: String,

    pub target_price: f64,

    pub is_active: bool,

    pub created_at: i64,
    pub triggered_at: Option<i64>,
}
