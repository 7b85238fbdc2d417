use std::env;

/// Which alerts do after they fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPolicy {
    /// Deactivate the alert the first time it fires.
    FireOnce,
    /// Leave the alert active; it fires again every cycle the price stays low.
    Repeat,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub host: String,
    pub port: u16,

    // "mock" | "live"
    pub flight_lookup: String,
    pub flight_api_key: String,

    pub check_interval_secs: u64,
    pub check_concurrency: usize,
    pub trigger_policy: TriggerPolicy,

    // When false, origin/destination may be any alphabetic city name of
    // at least 3 characters instead of a strict 3-letter airport code.
    pub strict_airport_codes: bool,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let mongodb_uri = env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mongodb_db = env::var("MONGODB_DB")
        .unwrap_or_else(|_| "farewatch".to_string());

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let flight_lookup = env::var("FLIGHT_LOOKUP").unwrap_or_else(|_| "mock".to_string());
    let flight_api_key = env::var("FLIGHT_API_KEY").unwrap_or_default();

    // 0 disables the in-process monitor; an external cron can drive
    // GET /cron/check-prices instead.
    let check_interval_secs = env::var("CHECK_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    let check_concurrency = env::var("CHECK_CONCURRENCY")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(4);

    let trigger_policy = match env::var("ALERT_TRIGGER_POLICY").as_deref() {
        Ok("repeat") => TriggerPolicy::Repeat,
        _ => TriggerPolicy::FireOnce,
    };

    let strict_airport_codes = env::var("STRICT_AIRPORT_CODES")
        .ok()
        .and_then(|s| s.parse::<bool>().ok())
        .unwrap_or(true);

    Settings {
        mongodb_uri,
        mongodb_db,
        host,
        port,
        flight_lookup,
        flight_api_key,
        check_interval_secs,
        check_concurrency,
        trigger_policy,
        strict_airport_codes,
    }
}
