use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// An (origin, destination, owner) triple tracked for pricing.
///
/// Unique per (origin, destination, user_id); created on first alert
/// creation and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    // uppercase 3-letter codes
    pub origin: String,
    pub destination: String,

    pub user_id: String,

    pub created_at: i64,
}
