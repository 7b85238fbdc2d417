use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use regex::Regex;

use crate::errors::{AppError, Result};
use crate::models::Route;
use crate::AppState;

/// Normalizes an origin/destination to its stored form.
///
/// Strict mode accepts exactly 3 ASCII letters (IATA-style codes); loose
/// mode also accepts city names of at least 3 letters. Either way the
/// result is uppercased before any lookup.
pub fn normalize_place(raw: &str, strict: bool) -> Result<String> {
    let trimmed = raw.trim();

    let (pattern, expected) = if strict {
        (r"^[A-Za-z]{3}$", "a 3-letter airport code")
    } else {
        (r"^[A-Za-z][A-Za-z \-]{2,}$", "a city name of at least 3 letters")
    };

    let re = Regex::new(pattern).unwrap();
    if !re.is_match(trimmed) {
        return Err(AppError::validation(format!(
            "'{trimmed}' is not {expected}"
        )));
    }

    Ok(trimmed.to_uppercase())
}

// Filter and $setOnInsert update for the route upsert. The filter is the
// full unique triple, so equal triples always address the same document.
fn route_upsert_documents(
    origin: &str,
    destination: &str,
    user_id: &str,
    now: i64,
) -> (Document, Document) {
    let filter = doc! { "origin": origin, "destination": destination, "user_id": user_id };

    let update = doc! { "$setOnInsert": {
        "origin": origin,
        "destination": destination,
        "user_id": user_id,
        "created_at": now,
    }};

    (filter, update)
}

/// Idempotent find-or-create on the unique (origin, destination, user_id)
/// triple. The same triple always resolves to the same route id.
pub async fn ensure_route(
    state: &AppState,
    origin: &str,
    destination: &str,
    user_id: &str,
) -> Result<Route> {
    let strict = state.settings.strict_airport_codes;
    let origin = normalize_place(origin, strict)?;
    let destination = normalize_place(destination, strict)?;

    let routes = state.db.collection::<Route>("routes");
    let now = Utc::now().timestamp();

    let opts = FindOneAndUpdateOptions::builder()
        .upsert(true)
        .return_document(ReturnDocument::After)
        .build();

    let (filter, update) = route_upsert_documents(&origin, &destination, user_id, now);

    let route = routes
        .find_one_and_update(filter, update, opts)
        .await?
        .ok_or_else(|| AppError::storage("route upsert returned no document"))?;

    Ok(route)
}

pub async fn get_route(state: &AppState, route_id: ObjectId) -> Result<Option<Route>> {
    let routes = state.db.collection::<Route>("routes");
    let route = routes.find_one(doc! { "_id": route_id }, None).await?;
    Ok(route)
}

/// Removes a route together with everything it owns: its alerts and its
/// price history.
pub async fn delete_route(state: &AppState, route_id: ObjectId) -> Result<()> {
    let alerts = state.db.collection::<mongodb::bson::Document>("alerts");
    alerts.delete_many(doc! { "route_id": route_id }, None).await?;

    let history = state.db.collection::<mongodb::bson::Document>("price_history");
    history.delete_many(doc! { "route_id": route_id }, None).await?;

    let routes = state.db.collection::<Route>("routes");
    routes.delete_one(doc! { "_id": route_id }, None).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_mode_uppercases_valid_codes() {
        assert_eq!(normalize_place("lhr", true).unwrap(), "LHR");
        assert_eq!(normalize_place(" CDG ", true).unwrap(), "CDG");
    }

    #[test]
    fn strict_mode_rejects_non_codes() {
        assert!(normalize_place("London", true).is_err());
        assert!(normalize_place("LH", true).is_err());
        assert!(normalize_place("LHR1", true).is_err());
        assert!(normalize_place("", true).is_err());
    }

    #[test]
    fn equivalent_raw_triples_address_the_same_route_document() {
        // Calling ensure twice with the same triple (however cased or
        // padded) produces the same upsert filter, and the unique index on
        // the triple guarantees that filter resolves to one route id.
        let a = normalize_place("lhr", true).unwrap();
        let b = normalize_place(" LHR ", true).unwrap();

        let (filter_a, _) = route_upsert_documents(&a, "CDG", "demo", 1);
        let (filter_b, _) = route_upsert_documents(&b, "CDG", "demo", 2);

        assert_eq!(filter_a, filter_b);
    }

    #[test]
    fn loose_mode_accepts_city_names() {
        assert_eq!(normalize_place("London", false).unwrap(), "LONDON");
        assert_eq!(normalize_place("New-York", false).unwrap(), "NEW-YORK");
        assert!(normalize_place("NY", false).is_err());
    }
}
