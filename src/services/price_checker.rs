//! The price-check orchestrator. One cycle walks every route that has an
//! active alert, fetches current candidates, logs the lowest fare and
//! evaluates the route's alerts against it. A failing route never aborts
//! the cycle; it is reported and retried naturally next cycle.

use std::time::Duration;

use futures_util::{stream, StreamExt};
use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use tokio::time;

use crate::config::TriggerPolicy;
use crate::errors::Result;
use crate::models::{Alert, PriceObservation, Route};
use crate::services::{alerts_service, evaluator, history_service, lookup};
use crate::AppState;

/// Summary of one cycle, returned to the invoking scheduler so behavior is
/// observable without log inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub routes_checked: usize,
    pub routes_failed: usize,
    pub alerts_triggered: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Observation written; `triggered` alerts fired.
    Checked { triggered: usize },
    /// Lookup succeeded with zero candidates: no price observed this cycle.
    NoCandidates,
    /// Lookup or storage failed for this route only.
    Failed,
}

pub fn summarize(outcomes: impl IntoIterator<Item = RouteOutcome>) -> CycleReport {
    let mut report = CycleReport::default();

    for outcome in outcomes {
        match outcome {
            RouteOutcome::Checked { triggered } => {
                report.routes_checked += 1;
                report.alerts_triggered += triggered;
            }
            RouteOutcome::NoCandidates => report.routes_checked += 1,
            RouteOutcome::Failed => report.routes_failed += 1,
        }
    }

    report
}

/// Runs one price-check cycle across all routes with active alerts.
/// Per-route work units are independent and run with bounded parallelism.
pub async fn run_price_check_cycle(state: &AppState) -> Result<CycleReport> {
    let routes = alerts_service::routes_with_active_alerts(state).await?;

    if routes.is_empty() {
        return Ok(CycleReport::default());
    }

    let outcomes: Vec<RouteOutcome> = stream::iter(routes)
        .map(|route| async move { check_route(state, &route).await })
        .buffer_unordered(state.settings.check_concurrency)
        .collect()
        .await;

    let report = summarize(outcomes);
    tracing::info!(
        routes_checked = report.routes_checked,
        routes_failed = report.routes_failed,
        alerts_triggered = report.alerts_triggered,
        "price check cycle finished"
    );

    Ok(report)
}

async fn check_route(state: &AppState, route: &Route) -> RouteOutcome {
    match try_check_route(state, route).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(
                origin = %route.origin,
                destination = %route.destination,
                error = %e,
                "price check failed for route"
            );
            RouteOutcome::Failed
        }
    }
}

async fn try_check_route(state: &AppState, route: &Route) -> Result<RouteOutcome> {
    let candidates = state
        .lookup
        .search(&route.origin, &route.destination, None)
        .await?;

    let Some(lowest) = lookup::cheapest(&candidates) else {
        tracing::debug!(
            origin = %route.origin,
            destination = %route.destination,
            "no candidates this cycle"
        );
        return Ok(RouteOutcome::NoCandidates);
    };

    let (_, triggered) = record_and_evaluate(
        state,
        route.id,
        lowest.price,
        &lowest.airline,
        &lowest.flight_number,
    )
    .await?;

    Ok(RouteOutcome::Checked {
        triggered: triggered.len(),
    })
}

/// The shared write+evaluate core behind both the cron-pull cycle and the
/// webhook push path. The observation is durably written before any alert
/// is evaluated against its price.
pub async fn record_and_evaluate(
    state: &AppState,
    route_id: ObjectId,
    price: f64,
    airline: &str,
    flight_number: &str,
) -> Result<(PriceObservation, Vec<Alert>)> {
    let observation =
        history_service::record_observation(state, route_id, price, airline, flight_number)
            .await?;

    let alerts = alerts_service::list_active_alerts_for_route(state, route_id).await?;
    let triggered: Vec<Alert> = evaluator::evaluate(&alerts, price)
        .into_iter()
        .cloned()
        .collect();

    let fire_once = state.settings.trigger_policy == TriggerPolicy::FireOnce;

    for alert in &triggered {
        alerts_service::mark_triggered(state, alert.id, fire_once).await?;

        tracing::info!(
            alert_id = %alert.id.to_hex(),
            target_price = alert.target_price,
            observed_price = price,
            "alert triggered"
        );

        // Notification delivery hangs off this bus; delivery itself is an
        // external collaborator.
        let _ = state
            .events_tx
            .send(format!("alertTriggered:{}", alert.id.to_hex()));
    }

    Ok((observation, triggered))
}

/// In-process scheduler: runs a cycle every `check_interval_secs`. Skipped
/// entirely when the interval is 0 (external cron mode).
pub fn spawn_price_check_monitor(state: AppState) {
    let secs = state.settings.check_interval_secs;
    if secs == 0 {
        return;
    }

    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_secs(secs));

        loop {
            interval.tick().await;

            if let Err(e) = run_price_check_cycle(&state).await {
                tracing::error!(error = %e, "price check cycle error");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use mongodb::bson::oid::ObjectId;
    use mongodb::Client;

    use crate::config;
    use crate::errors::AppError;
    use crate::services::lookup::{FlightCandidate, FlightLookup};

    use super::*;

    /// Unreachable provider for JFK departures, zero candidates elsewhere.
    /// Lets the catch-and-continue path run without any storage access.
    struct FlakyLookup;

    #[async_trait]
    impl FlightLookup for FlakyLookup {
        async fn search(
            &self,
            origin: &str,
            _destination: &str,
            _date: Option<NaiveDate>,
        ) -> Result<Vec<FlightCandidate>> {
            if origin == "JFK" {
                Err(AppError::lookup("provider unreachable"))
            } else {
                Ok(Vec::new())
            }
        }
    }

    async fn stub_state() -> AppState {
        let settings = config::load();

        let client = Client::with_uri_str(&settings.mongodb_uri)
            .await
            .expect("mongodb client");
        let db = client.database(&settings.mongodb_db);

        let (events_tx, _events_rx) = tokio::sync::broadcast::channel::<String>(16);

        AppState {
            db,
            settings,
            lookup: Arc::new(FlakyLookup),
            events_tx,
        }
    }

    fn route(origin: &str, destination: &str) -> Route {
        Route {
            id: ObjectId::new(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            user_id: "demo".to_string(),
            created_at: 0,
        }
    }

    #[tokio::test]
    async fn failing_lookup_maps_to_failed_and_spares_other_routes() {
        let state = stub_state().await;

        let failed = check_route(&state, &route("JFK", "LAX")).await;
        let checked = check_route(&state, &route("LHR", "CDG")).await;

        assert_eq!(failed, RouteOutcome::Failed);
        assert_eq!(checked, RouteOutcome::NoCandidates);

        let report = summarize(vec![checked, failed]);
        assert_eq!(report.routes_failed, 1);
        assert_eq!(report.routes_checked, 1);
    }

    #[tokio::test]
    async fn route_checks_run_on_a_spawned_task() {
        // The monitor runs cycles inside tokio::spawn, so per-route futures
        // must satisfy Send + 'static.
        let state = stub_state().await;

        let outcome =
            tokio::spawn(async move { check_route(&state, &route("JFK", "LAX")).await })
                .await
                .unwrap();

        assert_eq!(outcome, RouteOutcome::Failed);
    }

    #[test]
    fn one_failed_route_does_not_mask_the_others() {
        // 3 routes, the middle one fails: the other two still count.
        let outcomes = vec![
            RouteOutcome::Checked { triggered: 0 },
            RouteOutcome::Failed,
            RouteOutcome::Checked { triggered: 2 },
        ];

        let report = summarize(outcomes);
        assert_eq!(report.routes_checked, 2);
        assert_eq!(report.routes_failed, 1);
        assert_eq!(report.alerts_triggered, 2);
    }

    #[test]
    fn empty_candidate_list_counts_as_checked() {
        let report = summarize(vec![RouteOutcome::NoCandidates]);
        assert_eq!(report.routes_checked, 1);
        assert_eq!(report.routes_failed, 0);
    }

    #[test]
    fn empty_cycle_reports_zeroes() {
        assert_eq!(summarize(Vec::new()), CycleReport::default());
    }
}
