//! Library entrypoint for Farewatch.
//!
//! This file exists mainly to make controller tests easy (integration tests
//! under `tests/` can import the app state, routers, controllers, services).

use std::sync::Arc;

pub mod config;
pub mod errors;
pub mod models;

pub mod services;

pub mod controllers;
pub mod routes;

use services::lookup::FlightLookup;

#[derive(Clone)]
pub struct AppState {
    pub db: mongodb::Database,
    pub settings: config::Settings,
    pub lookup: Arc<dyn FlightLookup>,
    pub events_tx: tokio::sync::broadcast::Sender<String>,
}
