//! Live provider client (SerpApi Google Flights style). Provider payloads
//! are ad hoc; everything funnels through `normalize_candidate`, which maps
//! the known schema variants into `FlightCandidate` and fails explicitly
//! when none match.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;

use crate::errors::{AppError, Result};

use super::{FlightCandidate, FlightLookup, FlightStop};

const BASE_URL: &str = "https://serpapi.com/search";

#[derive(Clone)]
pub struct LiveFlightLookup {
    http: Client,
    api_key: String,
}

impl LiveFlightLookup {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
        }
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[async_trait]
impl FlightLookup for LiveFlightLookup {
    async fn search(
        &self,
        origin: &str,
        destination: &str,
        date: Option<NaiveDate>,
    ) -> Result<Vec<FlightCandidate>> {
        if !self.has_key() {
            return Err(AppError::lookup("FLIGHT_API_KEY is missing in .env"));
        }

        let mut query: Vec<(&str, String)> = vec![
            ("api_key", self.api_key.clone()),
            ("engine", "google_flights".to_string()),
            ("departure_id", origin.to_string()),
            ("arrival_id", destination.to_string()),
            ("hl", "en".to_string()),
            ("gl", "us".to_string()),
            ("currency", "USD".to_string()),
            ("type", "oneway".to_string()),
        ];

        if let Some(d) = date {
            query.push(("outbound_date", d.format("%Y-%m-%d").to_string()));
        }

        let res = self
            .http
            .get(BASE_URL)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::lookup(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::lookup(format!(
                "flight search failed: {status} {body}"
            )));
        }

        let payload: Value = res
            .json()
            .await
            .map_err(|e| AppError::lookup(e.to_string()))?;

        parse_search_payload(&payload)
    }
}

/// Collects candidate arrays from the payload. SerpApi splits results into
/// `best_flights` and `other_flights`; other providers return a flat
/// `flights` array.
pub fn parse_search_payload(payload: &Value) -> Result<Vec<FlightCandidate>> {
    let mut raw: Vec<&Value> = Vec::new();

    for key in ["best_flights", "other_flights", "flights"] {
        if let Some(arr) = payload.get(key).and_then(Value::as_array) {
            raw.extend(arr.iter());
        }
    }

    if raw.is_empty() {
        // No recognized candidate array at all is a schema mismatch, not an
        // empty result; an empty array is a legitimate zero-candidate reply.
        let recognized = ["best_flights", "other_flights", "flights"]
            .iter()
            .any(|k| payload.get(k).is_some());
        if !recognized {
            return Err(AppError::lookup(
                "provider response did not match any known schema",
            ));
        }
        return Ok(Vec::new());
    }

    raw.iter().map(|v| normalize_candidate(v)).collect()
}

fn string_field<'a>(v: &'a Value, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|n| v.get(*n).and_then(Value::as_str))
}

fn price_field(v: &Value) -> Option<f64> {
    match v.get("price") {
        Some(Value::Number(n)) => n.as_f64(),
        // { "price": { "total": 123 } }
        Some(Value::Object(o)) => o.get("total").and_then(Value::as_f64),
        _ => None,
    }
}

fn stop_field(v: &Value, flat: &str, nested: &str) -> FlightStop {
    // { "departure": { "airport", "time" } } or the SerpApi itinerary form
    // { "departure_airport": { "name", "time" } }.
    let node = v.get(flat).or_else(|| v.get(nested));

    let airport = node
        .and_then(|n| string_field(n, &["airport", "name", "id"]))
        .unwrap_or_default()
        .to_string();
    let time = node
        .and_then(|n| string_field(n, &["time"]))
        .unwrap_or_default()
        .to_string();
    let date = node
        .and_then(|n| string_field(n, &["date"]))
        .map(str::to_string);

    FlightStop { airport, time, date }
}

/// Maps one raw provider entry into the single `FlightCandidate` shape.
/// Airline and price are mandatory; a record carrying neither shape is a
/// lookup error rather than a silently dropped row.
pub fn normalize_candidate(v: &Value) -> Result<FlightCandidate> {
    // SerpApi itineraries nest the priced legs under "flights"; take the
    // first leg for airline/flight-number and the itinerary price.
    if let Some(leg) = v
        .get("flights")
        .and_then(Value::as_array)
        .and_then(|legs| legs.first())
    {
        let price = price_field(v)
            .ok_or_else(|| AppError::lookup("provider flight entry is missing a price"))?;
        let airline = string_field(leg, &["airline"])
            .ok_or_else(|| AppError::lookup("provider flight entry is missing an airline"))?;
        let flight_number = string_field(leg, &["flight_number", "flightNumber"])
            .unwrap_or_default()
            .to_string();

        return Ok(FlightCandidate {
            airline: airline.to_string(),
            flight_number,
            price,
            departure: stop_field(leg, "departure", "departure_airport"),
            arrival: stop_field(leg, "arrival", "arrival_airport"),
        });
    }

    let airline = string_field(v, &["airline"])
        .ok_or_else(|| AppError::lookup("provider flight entry is missing an airline"))?;
    let price = price_field(v)
        .ok_or_else(|| AppError::lookup("provider flight entry is missing a price"))?;
    let flight_number = string_field(v, &["flight_number", "flightNumber"])
        .unwrap_or_default()
        .to_string();

    Ok(FlightCandidate {
        airline: airline.to_string(),
        flight_number,
        price,
        departure: stop_field(v, "departure", "departure_airport"),
        arrival: stop_field(v, "arrival", "arrival_airport"),
    })
}
