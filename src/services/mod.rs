pub mod db_init;
pub mod lookup;

pub mod alerts_service;
pub mod evaluator;
pub mod history_service;
pub mod price_checker;
pub mod routes_service;
