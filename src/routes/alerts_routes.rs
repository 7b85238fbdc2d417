use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{controllers::alerts_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/alerts", post(alerts_controller::post_create_alert))
        .route(
            "/alerts/:id/deactivate",
            post(alerts_controller::post_deactivate_alert),
        )
        .route(
            "/routes/:id/price-history",
            get(alerts_controller::get_route_price_history),
        )
        .route("/routes/:id", delete(alerts_controller::delete_route))
}
