//! Seat management
//!
//! This module tracks which players sit at which table and keeps the undo
//! history for roster changes.

pub mod roster;

// Re-export commonly used types
pub use roster::{SeatAction, SeatMap};
