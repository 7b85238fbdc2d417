pub mod alert;
pub mod observation;
pub mod route;

pub use alert::Alert;
pub use observation::PriceObservation;
pub use route::Route;

/// Owner id used when no auth context exists.
pub const DEFAULT_USER_ID: &str = "demo";
