//! Deterministic flight data for demos and tests. Given identical
//! (origin, destination, date) the generator returns identical prices, so
//! orchestrator behavior can be asserted without the live provider.

use std::f64::consts::PI;

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Utc};

use crate::errors::Result;

use super::{FlightCandidate, FlightLookup, FlightStop};

// (airline, flight number, base price, departure time, arrival time)
type BaseFlight = (&'static str, &'static str, f64, &'static str, &'static str);

const LHR_CDG: &[BaseFlight] = &[
    ("British Airways", "BA346", 189.0, "07:30", "09:45"),
    ("Air France", "AF1681", 165.0, "10:15", "12:30"),
    ("British Airways", "BA352", 210.0, "14:45", "17:00"),
    ("Air France", "AF1689", 178.0, "16:30", "18:45"),
    ("British Airways", "BA358", 195.0, "19:15", "21:30"),
];

const JFK_LAX: &[BaseFlight] = &[
    ("American Airlines", "AA123", 399.0, "08:00", "11:30"),
    ("Delta", "DL456", 425.0, "11:15", "14:45"),
    ("United Airlines", "UA789", 385.0, "14:30", "18:00"),
    ("American Airlines", "AA125", 445.0, "16:45", "20:15"),
    ("Delta", "DL458", 375.0, "20:00", "23:30"),
];

const DXB_SIN: &[BaseFlight] = &[
    ("Emirates", "EK354", 750.0, "03:15", "14:45"),
    ("Singapore Airlines", "SQ495", 785.0, "09:30", "21:15"),
];

fn base_flights(origin: &str, destination: &str) -> &'static [BaseFlight] {
    match (origin, destination) {
        ("LHR", "CDG") => LHR_CDG,
        ("JFK", "LAX") => JFK_LAX,
        ("DXB", "SIN") => DXB_SIN,
        _ => &[],
    }
}

/// Predictable price wobble around a base fare: weekends cost 20% more,
/// fares swell up to 15% mid-month, and a sine of (day * weekday) stands in
/// for randomness so the result is a pure function of the date.
pub fn price_variation(base_price: f64, date: NaiveDate) -> f64 {
    let day_of_week = date.weekday().num_days_from_sunday();
    let day_of_month = date.day();

    let weekend_multiplier = if day_of_week == 0 || day_of_week == 6 {
        1.2
    } else {
        1.0
    };

    let month_multiplier = 1.0 + ((day_of_month as f64 / 31.0) * PI).sin() * 0.15;

    let pseudo_random = 0.9 + ((day_of_month * day_of_week) as f64).sin() * 0.2;

    (base_price * weekend_multiplier * month_multiplier * pseudo_random).round()
}

fn default_search_date() -> NaiveDate {
    // Flights 30 days out, matching what the live provider is asked for.
    Utc::now().date_naive() + Duration::days(30)
}

#[derive(Debug, Clone, Default)]
pub struct MockFlightLookup;

impl MockFlightLookup {
    pub fn new() -> Self {
        MockFlightLookup
    }

    /// Daily lowest-fare sequence for a route starting at `start`, one entry
    /// per day. Re-running with identical inputs yields an identical
    /// sequence.
    pub fn date_range_prices(
        &self,
        origin: &str,
        destination: &str,
        start: NaiveDate,
        days: u32,
    ) -> Vec<(NaiveDate, f64)> {
        let base_price = base_flights(origin, destination)
            .first()
            .map(|f| f.2)
            .unwrap_or(200.0);

        (0..days)
            .map(|i| {
                let date = start + Duration::days(i64::from(i));
                (date, price_variation(base_price, date))
            })
            .collect()
    }
}

#[async_trait]
impl FlightLookup for MockFlightLookup {
    async fn search(
        &self,
        origin: &str,
        destination: &str,
        date: Option<NaiveDate>,
    ) -> Result<Vec<FlightCandidate>> {
        let date = date.unwrap_or_else(default_search_date);

        let candidates = base_flights(origin, destination)
            .iter()
            .map(|&(airline, flight_number, base_price, dep_time, arr_time)| FlightCandidate {
                airline: airline.to_string(),
                flight_number: flight_number.to_string(),
                price: price_variation(base_price, date),
                departure: FlightStop {
                    airport: origin.to_string(),
                    time: dep_time.to_string(),
                    date: Some(date.format("%Y-%m-%d").to_string()),
                },
                arrival: FlightStop {
                    airport: destination.to_string(),
                    time: arr_time.to_string(),
                    date: None,
                },
            })
            .collect();

        Ok(candidates)
    }
}
