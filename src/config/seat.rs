//! Seat configuration

use serde::{Deserialize, Serialize};

/// Largest table the game supports
pub const MAX_SEAT_CAPACITY: usize = 6;

/// Limits applied to seat rosters and confirmed rankings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatSettings {
    pub capacity: usize,
    /// Smallest roster that may confirm a ranking
    pub min_players: usize,
}

impl Default for SeatSettings {
    fn default() -> Self {
        Self {
            capacity: MAX_SEAT_CAPACITY,
            min_players: 2,
        }
    }
}
