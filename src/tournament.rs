//! Tournament context
//!
//! Owns the player table, the seats and the round log, and is the only place
//! that sequences scoring passes. Callers hold it exclusively (`&mut self`),
//! so two confirmations can never interleave on the same table.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::SeatSettings;
use crate::error::{Result, TournamentError};
use crate::rating::{PlayerTable, RatingCalculator};
use crate::seat::{SeatAction, SeatMap};
use crate::types::{PlayerId, RoundRecord};
use crate::utils::{current_timestamp, generate_round_id};

/// Serializable snapshot of a tournament
///
/// `seatMap` holds the rosters only; the undo history is stored beside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentState {
    pub seat_map: SeatMap,
    pub player_data: PlayerTable,
    #[serde(default)]
    pub history: Vec<SeatAction>,
    #[serde(default)]
    pub rounds: Vec<RoundRecord>,
}

pub struct Tournament {
    players: PlayerTable,
    seats: SeatMap,
    rounds: Vec<RoundRecord>,
    calculator: Arc<dyn RatingCalculator>,
    seat_settings: SeatSettings,
}

impl Tournament {
    /// Start an empty tournament
    pub fn new(calculator: Arc<dyn RatingCalculator>, seat_settings: SeatSettings) -> Self {
        Self {
            players: PlayerTable::new(),
            seats: SeatMap::new(),
            rounds: Vec::new(),
            calculator,
            seat_settings,
        }
    }

    /// Resume from a stored snapshot.
    ///
    /// Player records that break the rating rules (a rate below the floor, a
    /// rank no seat can produce) are rejected with a storage error.
    pub fn from_state(
        state: TournamentState,
        calculator: Arc<dyn RatingCalculator>,
        seat_settings: SeatSettings,
    ) -> Result<Self> {
        if let Err(e) = state.player_data.validate_records(calculator.rules()) {
            warn!("Refusing stored state: {}", e);
            return Err(e);
        }

        Ok(Self {
            players: state.player_data,
            seats: state.seat_map.with_history(state.history),
            rounds: state.rounds,
            calculator,
            seat_settings,
        })
    }

    pub fn state(&self) -> TournamentState {
        TournamentState {
            seat_map: self.seats.clone(),
            player_data: self.players.clone(),
            history: self.seats.history().to_vec(),
            rounds: self.rounds.clone(),
        }
    }

    pub fn players(&self) -> &PlayerTable {
        &self.players
    }

    pub fn seats(&self) -> &SeatMap {
        &self.seats
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    pub fn open_seat(&mut self, seat_id: &str) -> bool {
        self.seats.open_seat(seat_id)
    }

    /// Seat a player, opening the seat and creating the player record on
    /// first appearance. Returns `true` if the player is new to the tournament.
    pub fn join(&mut self, seat_id: &str, player_id: &str) -> Result<bool> {
        self.seats.open_seat(seat_id);
        self.seats.seat_player(seat_id, player_id, &self.seat_settings)?;

        let registered = self.players.ensure_player(player_id, self.calculator.rules());
        if registered {
            info!("Registered new player {}", player_id);
        }
        Ok(registered)
    }

    pub fn leave(&mut self, seat_id: &str, player_id: &str) -> Result<()> {
        self.seats.remove_player(seat_id, player_id)
    }

    pub fn remove_seat(&mut self, seat_id: &str) -> Result<()> {
        self.seats.remove_seat(seat_id)
    }

    /// Revert the latest roster change; ratings are never rolled back
    pub fn undo(&mut self) -> Result<SeatAction> {
        self.seats.undo()
    }

    pub fn rename(&mut self, player_id: &str, nickname: &str) -> Result<()> {
        self.players.set_nickname(player_id, nickname)
    }

    /// Score a seat's agreed finish order and log the round.
    ///
    /// The order must rank exactly the players currently seated there.
    pub fn confirm_ranking(
        &mut self,
        seat_id: &str,
        finish_order: &[PlayerId],
    ) -> Result<RoundRecord> {
        let roster = self
            .seats
            .roster(seat_id)
            .ok_or_else(|| TournamentError::SeatNotFound {
                seat_id: seat_id.to_string(),
            })?;

        let min_players = self.seat_settings.min_players;
        if let Err(reason) = check_matches_roster(roster, finish_order, min_players) {
            warn!("Rejected ranking for {}: {}", seat_id, reason);
            return Err(TournamentError::InvalidOrder { reason }.into());
        }

        let outcome = self.calculator.score_round(&mut self.players, finish_order)?;

        let record = RoundRecord {
            round_id: generate_round_id(),
            seat_id: seat_id.to_string(),
            finish_order: finish_order.to_vec(),
            changes: outcome.changes,
            recorded_at: current_timestamp(),
        };
        info!(
            "Round {} confirmed for {} ({} players)",
            record.round_id,
            seat_id,
            finish_order.len()
        );
        self.rounds.push(record.clone());
        Ok(record)
    }
}

fn check_matches_roster(
    roster: &[PlayerId],
    finish_order: &[PlayerId],
    min_players: usize,
) -> std::result::Result<(), String> {
    if finish_order.len() < min_players {
        return Err(format!(
            "{} players ranked, at least {} required",
            finish_order.len(),
            min_players
        ));
    }
    if finish_order.len() != roster.len() {
        return Err(format!(
            "{} players ranked but {} seated",
            finish_order.len(),
            roster.len()
        ));
    }

    let seated: HashSet<&str> = roster.iter().map(String::as_str).collect();
    let mut seen = HashSet::with_capacity(finish_order.len());
    for player_id in finish_order {
        if !seated.contains(player_id.as_str()) {
            return Err(format!("{} is not seated here", player_id));
        }
        if !seen.insert(player_id.as_str()) {
            return Err(format!("duplicate player {}", player_id));
        }
    }
    Ok(())
}
