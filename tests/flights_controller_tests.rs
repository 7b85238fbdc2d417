use std::sync::Arc;

use axum::{
    http::{header, Request, StatusCode},
    routing::{get, post},
    Router,
};
use http_body_util::BodyExt;
use mongodb::Client;
use serde_json::Value;
use tower::ServiceExt;

use farewatch::services::lookup::MockFlightLookup;
use farewatch::{
    config,
    controllers::{flights_controller, webhooks_controller},
    AppState,
};

async fn test_state() -> AppState {
    let settings = config::load();

    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("mongodb client");
    let db = client.database(&settings.mongodb_db);

    let (events_tx, _events_rx) = tokio::sync::broadcast::channel::<String>(16);

    AppState {
        db,
        settings,
        lookup: Arc::new(MockFlightLookup::new()),
        events_tx,
    }
}

async fn response_json(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn search_app(state: AppState) -> Router {
    Router::new()
        .route("/flights/search", get(flights_controller::get_search))
        .with_state(state)
}

async fn get_uri(app: Router, uri: &str) -> axum::response::Response {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    app.oneshot(req).await.unwrap()
}

#[tokio::test]
async fn search_without_destination_returns_400() {
    let app = search_app(test_state().await);

    let res = get_uri(app, "/flights/search?origin=LHR").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_json(res).await;
    assert_eq!(body["success"], Value::Bool(false));
}

#[tokio::test]
async fn search_known_route_returns_flights() {
    let app = search_app(test_state().await);

    let res = get_uri(app, "/flights/search?origin=lhr&destination=cdg&date=2026-09-15").await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["flights"].as_array().unwrap().len(), 5);
    assert_eq!(body["message"], Value::String("Found 5 flights".to_string()));
}

#[tokio::test]
async fn search_unknown_route_returns_empty_list() {
    let app = search_app(test_state().await);

    let res = get_uri(app, "/flights/search?origin=AAA&destination=ZZZ&date=2026-09-15").await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    assert_eq!(body["flights"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn search_with_bad_date_returns_400() {
    let app = search_app(test_state().await);

    let res = get_uri(app, "/flights/search?origin=LHR&destination=CDG&date=tomorrow").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn webhook_with_malformed_route_id_returns_400() {
    let app = Router::new()
        .route(
            "/webhooks/flight-prices",
            post(webhooks_controller::post_flight_prices),
        )
        .with_state(test_state().await);

    let req = Request::builder()
        .method("POST")
        .uri("/webhooks/flight-prices")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            r#"{"route_id":"nope","price":120.0,"airline":"Delta","flight_number":"DL1"}"#,
        ))
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn webhook_with_non_positive_price_returns_400() {
    let app = Router::new()
        .route(
            "/webhooks/flight-prices",
            post(webhooks_controller::post_flight_prices),
        )
        .with_state(test_state().await);

    let req = Request::builder()
        .method("POST")
        .uri("/webhooks/flight-prices")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(format!(
            r#"{{"route_id":"{}","price":-10.0,"airline":"Delta","flight_number":"DL1"}}"#,
            mongodb::bson::oid::ObjectId::new().to_hex()
        )))
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
