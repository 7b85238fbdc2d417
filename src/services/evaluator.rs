use crate::models::Alert;

/// Pure threshold check: an alert fires iff it is active and the observed
/// price is at or below its target. Equality triggers. Callers decide what
/// firing means (notify, deactivate, log).
pub fn evaluate(alerts: &[Alert], observed_price: f64) -> Vec<&Alert> {
    alerts
        .iter()
        .filter(|a| a.is_active && observed_price <= a.target_price)
        .collect()
}
