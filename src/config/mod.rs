//! Configuration management for the throne-room service
//!
//! This module handles configuration loading from environment variables
//! and TOML files, validation, and default values.

pub mod app;
pub mod rating;
pub mod seat;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use rating::RatingRules;
pub use seat::{SeatSettings, MAX_SEAT_CAPACITY};
