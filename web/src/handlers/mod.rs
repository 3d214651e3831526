//! HTTP request handlers.

pub mod health;
pub mod orders;

pub use health::health_check;
pub use orders::{get_order, get_orders};
