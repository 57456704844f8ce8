//! Error types for the tournament service
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific tournament scenarios
#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    #[error("Invalid finish order: {reason}")]
    InvalidOrder { reason: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Seat not found: {seat_id}")]
    SeatNotFound { seat_id: String },

    #[error("Seat {seat_id} is full ({capacity} players)")]
    SeatFull { seat_id: String, capacity: usize },

    #[error("Player {player_id} is already seated at {seat_id}")]
    PlayerAlreadySeated { seat_id: String, player_id: String },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

impl TournamentError {
    pub(crate) fn invalid_order(reason: impl Into<String>) -> Self {
        Self::InvalidOrder {
            reason: reason.into(),
        }
    }
}
