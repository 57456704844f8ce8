//! Seat rosters with an undo history
//!
//! Mirrors what happens at the physical tables: seats are opened, players sit
//! down or leave, whole seats are cleared. Every roster change is recorded so
//! the last one can be reverted. Player ratings are never touched here.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{info, warn};

use crate::config::SeatSettings;
use crate::error::{Result, TournamentError};
use crate::types::{PlayerId, SeatId};

/// A reversible roster change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SeatAction {
    AddPlayer {
        seat_id: SeatId,
        player_id: PlayerId,
    },
    RemovePlayer {
        seat_id: SeatId,
        player_id: PlayerId,
        index: usize,
    },
    RemoveSeat {
        seat_id: SeatId,
        players: Vec<PlayerId>,
        /// Position among the open seats; absent in older snapshots
        #[serde(default)]
        index: usize,
    },
}

/// All seats and their rosters, in the order the seats were opened
///
/// Serializes as a map of seat id to roster. The undo history is kept in
/// memory and persisted separately (see [`SeatMap::with_history`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatMap {
    seats: Vec<(SeatId, Vec<PlayerId>)>,
    history: Vec<SeatAction>,
}

impl SeatMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a previously stored undo history
    pub fn with_history(mut self, history: Vec<SeatAction>) -> Self {
        self.history = history;
        self
    }

    /// Roster of a seat in seating order
    pub fn roster(&self, seat_id: &str) -> Option<&[PlayerId]> {
        self.position(seat_id).map(|i| self.seats[i].1.as_slice())
    }

    pub fn seats(&self) -> impl Iterator<Item = (&SeatId, &Vec<PlayerId>)> {
        self.seats.iter().map(|(id, roster)| (id, roster))
    }

    pub fn history(&self) -> &[SeatAction] {
        &self.history
    }

    fn position(&self, seat_id: &str) -> Option<usize> {
        self.seats.iter().position(|(id, _)| id == seat_id)
    }

    fn roster_mut(&mut self, seat_id: &str) -> Result<&mut Vec<PlayerId>> {
        let i = self
            .position(seat_id)
            .ok_or_else(|| TournamentError::SeatNotFound {
                seat_id: seat_id.to_string(),
            })?;
        Ok(&mut self.seats[i].1)
    }

    /// Open a seat if it does not exist yet; returns `true` if it was created
    pub fn open_seat(&mut self, seat_id: &str) -> bool {
        if self.position(seat_id).is_some() {
            return false;
        }
        self.seats.push((seat_id.to_string(), Vec::new()));
        info!("Seat {} opened", seat_id);
        true
    }

    /// Seat a player at an existing seat
    pub fn seat_player(
        &mut self,
        seat_id: &str,
        player_id: &str,
        settings: &SeatSettings,
    ) -> Result<()> {
        let roster = self.roster_mut(seat_id)?;

        if roster.iter().any(|p| p == player_id) {
            warn!("{} is already seated at {}", player_id, seat_id);
            return Err(TournamentError::PlayerAlreadySeated {
                seat_id: seat_id.to_string(),
                player_id: player_id.to_string(),
            }
            .into());
        }

        if roster.len() >= settings.capacity {
            warn!("Seat {} is full, rejecting {}", seat_id, player_id);
            return Err(TournamentError::SeatFull {
                seat_id: seat_id.to_string(),
                capacity: settings.capacity,
            }
            .into());
        }

        roster.push(player_id.to_string());
        self.history.push(SeatAction::AddPlayer {
            seat_id: seat_id.to_string(),
            player_id: player_id.to_string(),
        });
        info!("{} seated at {}", player_id, seat_id);
        Ok(())
    }

    pub fn remove_player(&mut self, seat_id: &str, player_id: &str) -> Result<()> {
        let roster = self.roster_mut(seat_id)?;

        let index = roster
            .iter()
            .position(|p| p == player_id)
            .ok_or_else(|| TournamentError::PlayerNotFound {
                player_id: player_id.to_string(),
            })?;

        roster.remove(index);
        self.history.push(SeatAction::RemovePlayer {
            seat_id: seat_id.to_string(),
            player_id: player_id.to_string(),
            index,
        });
        info!("{} left {}", player_id, seat_id);
        Ok(())
    }

    pub fn remove_seat(&mut self, seat_id: &str) -> Result<()> {
        let index = self
            .position(seat_id)
            .ok_or_else(|| TournamentError::SeatNotFound {
                seat_id: seat_id.to_string(),
            })?;
        let (_, players) = self.seats.remove(index);

        info!("Seat {} removed ({} players)", seat_id, players.len());
        self.history.push(SeatAction::RemoveSeat {
            seat_id: seat_id.to_string(),
            players,
            index,
        });
        Ok(())
    }

    /// Revert the most recent roster change and return it
    pub fn undo(&mut self) -> Result<SeatAction> {
        let action = self.history.pop().ok_or(TournamentError::NothingToUndo)?;

        match &action {
            SeatAction::AddPlayer { seat_id, player_id } => {
                if let Ok(roster) = self.roster_mut(seat_id) {
                    roster.retain(|p| p != player_id);
                }
            }
            SeatAction::RemovePlayer {
                seat_id,
                player_id,
                index,
            } => {
                if let Ok(roster) = self.roster_mut(seat_id) {
                    let index = (*index).min(roster.len());
                    roster.insert(index, player_id.clone());
                }
            }
            SeatAction::RemoveSeat {
                seat_id,
                players,
                index,
            } => match self.position(seat_id) {
                Some(i) => self.seats[i].1 = players.clone(),
                None => {
                    let index = (*index).min(self.seats.len());
                    self.seats.insert(index, (seat_id.clone(), players.clone()));
                }
            },
        }

        info!("Undid {:?}", action);
        Ok(action)
    }
}

impl Serialize for SeatMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.seats.len()))?;
        for (seat_id, roster) in &self.seats {
            map.serialize_entry(seat_id, roster)?;
        }
        map.end()
    }
}

struct SeatMapVisitor;

impl<'de> Visitor<'de> for SeatMapVisitor {
    type Value = SeatMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of seat id to roster")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Self::Value, A::Error> {
        let mut seats = SeatMap::new();
        while let Some((seat_id, roster)) = access.next_entry::<SeatId, Vec<PlayerId>>()? {
            match seats.position(&seat_id) {
                Some(i) => seats.seats[i].1 = roster,
                None => seats.seats.push((seat_id, roster)),
            }
        }
        Ok(seats)
    }
}

impl<'de> Deserialize<'de> for SeatMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(SeatMapVisitor)
    }
}
