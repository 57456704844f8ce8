//! Common types used throughout the tournament service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for players (the code printed on their card)
pub type PlayerId = String;

/// Unique identifier for seats (physical tables)
pub type SeatId = String;

/// Unique identifier for scored rounds
pub type RoundId = Uuid;

/// Ordinal badge held by one of the three highest-rated players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Title {
    First,
    Second,
    Third,
}

impl Title {
    /// Titles in the order they are handed out
    pub const ALL: [Title; 3] = [Title::First, Title::Second, Title::Third];

    /// Title for a zero-based standing, if that standing carries one
    pub fn for_standing(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Title::First => write!(f, "👑 Champion"),
            Title::Second => write!(f, "🥈 Challenger"),
            Title::Third => write!(f, "🥉 Contender"),
        }
    }
}

/// Rating state of a single player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub nickname: String,
    pub rate: i32,
    /// Finishing position in the most recently scored round
    #[serde(default)]
    pub last_rank: Option<u32>,
    /// Point delta applied by the most recent scoring pass
    #[serde(default)]
    pub bonus: i32,
    #[serde(default)]
    pub title: Option<Title>,
}

impl PlayerRecord {
    /// Create an unranked record; the nickname defaults to the identifier
    pub fn new(player_id: &str, initial_rate: i32) -> Self {
        Self {
            nickname: player_id.to_string(),
            rate: initial_rate,
            last_rank: None,
            bonus: 0,
            title: None,
        }
    }
}

/// Rating change applied to one player during a scoring pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub player_id: PlayerId,
    pub previous_rank: Option<u32>,
    pub rank: u32,
    pub old_rate: i32,
    pub new_rate: i32,
    /// Point delta before the floor clamp
    pub point: i32,
    /// Whether the throne-usurpation bonus was awarded
    pub usurped: bool,
}

/// Result of one scoring pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// One entry per player, in finish order
    pub changes: Vec<RatingChange>,
}

impl RoundOutcome {
    /// Look up the change recorded for a player
    pub fn change_for(&self, player_id: &str) -> Option<&RatingChange> {
        self.changes.iter().find(|c| c.player_id == player_id)
    }
}

/// Log entry for a confirmed round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_id: RoundId,
    pub seat_id: SeatId,
    pub finish_order: Vec<PlayerId>,
    pub changes: Vec<RatingChange>,
    pub recorded_at: DateTime<Utc>,
}
