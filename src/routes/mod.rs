use axum::Router;

use crate::{controllers::home_controller, AppState};

pub mod alerts_routes;
pub mod cron_routes;
pub mod flights_routes;
pub mod home_routes;
pub mod webhooks_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = alerts_routes::add_routes(router);
    let router = flights_routes::add_routes(router);
    let router = cron_routes::add_routes(router);
    let router = webhooks_routes::add_routes(router);

    router
        .fallback(home_controller::not_found)
        .with_state(state)
}
