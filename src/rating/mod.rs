//! Momentum rating system
//!
//! This module provides the player table, the scoring pass, title assignment,
//! and the calculator trait the tournament scores rounds through.

pub mod calculator;
pub mod engine;
pub mod table;
pub mod titles;

// Re-export commonly used types
pub use calculator::{MomentumRatingCalculator, RatingCalculator};
pub use engine::{score, validate_order};
pub use table::PlayerTable;
pub use titles::{assign_titles, titleholders};
