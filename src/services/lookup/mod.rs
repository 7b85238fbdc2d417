use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

pub mod live;
pub mod mock;

pub use live::LiveFlightLookup;
pub use mock::MockFlightLookup;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightStop {
    pub airport: String,
    pub time: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// One priced flight returned by a search. Transient: only the cheapest
/// candidate of a search ends up in the price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightCandidate {
    pub airline: String,
    pub flight_number: String,
    pub price: f64,
    pub departure: FlightStop,
    pub arrival: FlightStop,
}

/// The external capability that returns current flight candidates for a
/// route. Implementations: a deterministic mock and a live provider client,
/// selected by configuration.
///
/// An empty candidate list is a valid outcome ("no price observed this
/// cycle"); errors are reserved for transport failures and unparseable
/// provider payloads.
#[async_trait]
pub trait FlightLookup: Send + Sync {
    async fn search(
        &self,
        origin: &str,
        destination: &str,
        date: Option<NaiveDate>,
    ) -> Result<Vec<FlightCandidate>>;
}

/// Picks the lowest-priced candidate of a search.
pub fn cheapest(candidates: &[FlightCandidate]) -> Option<&FlightCandidate> {
    candidates
        .iter()
        .min_by(|a, b| a.price.total_cmp(&b.price))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(price: f64) -> FlightCandidate {
        FlightCandidate {
            airline: "Air France".to_string(),
            flight_number: "AF1681".to_string(),
            price,
            departure: FlightStop {
                airport: "LHR".to_string(),
                time: "10:15".to_string(),
                date: None,
            },
            arrival: FlightStop {
                airport: "CDG".to_string(),
                time: "12:30".to_string(),
                date: None,
            },
        }
    }

    #[test]
    fn cheapest_picks_minimum_price() {
        let candidates = vec![candidate(165.0), candidate(189.0), candidate(210.0)];
        let lowest = cheapest(&candidates).unwrap();
        assert_eq!(lowest.price, 165.0);
    }

    #[test]
    fn cheapest_of_empty_is_none() {
        assert!(cheapest(&[]).is_none());
    }
}
