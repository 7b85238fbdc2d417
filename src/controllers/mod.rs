pub mod alerts_controller;
pub mod cron_controller;
pub mod flights_controller;
pub mod home_controller;
pub mod webhooks_controller;
