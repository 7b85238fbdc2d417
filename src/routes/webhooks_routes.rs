use axum::{routing::post, Router};

use crate::{controllers::webhooks_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route(
        "/webhooks/flight-prices",
        post(webhooks_controller::post_flight_prices),
    )
}
