use std::net::SocketAddr;
use std::sync::Arc;

use mongodb::Client;

use farewatch::services::lookup::{FlightLookup, LiveFlightLookup, MockFlightLookup};
use farewatch::services::{db_init, price_checker};
use farewatch::{config, routes, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    // Mongo connection
    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");
    let db = client.database(&settings.mongodb_db);

    if let Err(e) = db_init::ensure_indexes(&db).await {
        tracing::warn!(error = %e, "could not ensure indexes");
    }

    let lookup: Arc<dyn FlightLookup> = match settings.flight_lookup.as_str() {
        "live" => Arc::new(LiveFlightLookup::new(settings.flight_api_key.clone())),
        _ => Arc::new(MockFlightLookup::new()),
    };

    let (events_tx, _events_rx) = tokio::sync::broadcast::channel::<String>(64);

    let state = AppState {
        db,
        settings: settings.clone(),
        lookup,
        events_tx,
    };

    // In-process scheduler; no-op when CHECK_INTERVAL_SECS=0.
    price_checker::spawn_price_check_monitor(state.clone());

    let app = routes::app(state);

    let addr = SocketAddr::from((
        settings.host.parse::<std::net::IpAddr>().expect("bad HOST"),
        settings.port,
    ));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind failed");
    axum::serve(listener, app).await.expect("server error");
}
