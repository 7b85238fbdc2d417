use axum::{routing::get, Router};

use crate::{controllers::flights_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/flights/search", get(flights_controller::get_search))
}
