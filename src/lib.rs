//! Throne Room - rating engine for round-robin card-game tournaments
//!
//! Seats hold up to six players. Every confirmed finish order runs the
//! momentum rating pass over the player table and re-crowns the top three.

pub mod config;
pub mod error;
pub mod rating;
pub mod seat;
pub mod standings;
pub mod storage;
pub mod tournament;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, TournamentError};
pub use types::*;

// Re-export key components
pub use rating::{MomentumRatingCalculator, PlayerTable, RatingCalculator};
pub use seat::SeatMap;
pub use tournament::{Tournament, TournamentState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
