//! Utility functions for the tournament service

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique round ID
pub fn generate_round_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Scale a point by `factor`, rounding toward negative infinity
pub fn scale_floor(point: i32, factor: f64) -> i32 {
    (f64::from(point) * factor).floor() as i32
}
