use mongodb::{bson::doc, options::IndexOptions, Database, IndexModel};

use crate::errors::Result;

pub async fn ensure_indexes(db: &Database) -> Result<()> {
    // routes: unique per (origin, destination, user_id)
    {
        let col = db.collection::<mongodb::bson::Document>("routes");
        let model = IndexModel::builder()
            .keys(doc! { "origin": 1, "destination": 1, "user_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None).await?;
    }

    // alerts: the cycle scans for active alerts per route
    {
        let col = db.collection::<mongodb::bson::Document>("alerts");
        let model = IndexModel::builder()
            .keys(doc! { "route_id": 1, "is_active": 1 })
            .build();

        col.create_index(model, None).await?;
    }

    // price_history: query per route, newest first
    {
        let col = db.collection::<mongodb::bson::Document>("price_history");
        let model = IndexModel::builder()
            .keys(doc! { "route_id": 1, "observed_at": -1 })
            .build();

        col.create_index(model, None).await?;
    }

    Ok(())
}
