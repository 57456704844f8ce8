//! Test fixtures and doubles for integration testing

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use throne_room::config::{RatingRules, SeatSettings};
use throne_room::error::Result;
use throne_room::rating::{MomentumRatingCalculator, PlayerTable, RatingCalculator};
use throne_room::types::{PlayerId, PlayerRecord, RoundOutcome};
use throne_room::Tournament;

/// Calculator that records every finish order before delegating to the real rules
#[derive(Debug, Default)]
pub struct RecordingRatingCalculator {
    inner: MomentumRatingCalculator,
    calls: Mutex<Vec<Vec<PlayerId>>>,
}

impl RecordingRatingCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish orders scored so far (for testing)
    pub fn get_calls(&self) -> Vec<Vec<PlayerId>> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl RatingCalculator for RecordingRatingCalculator {
    fn score_round(
        &self,
        table: &mut PlayerTable,
        finish_order: &[PlayerId],
    ) -> Result<RoundOutcome> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(finish_order.to_vec());
        }
        self.inner.score_round(table, finish_order)
    }

    fn rules(&self) -> &RatingRules {
        self.inner.rules()
    }
}

/// Tournament wired to a recording calculator
pub fn create_test_tournament() -> (Tournament, Arc<RecordingRatingCalculator>) {
    let calculator = Arc::new(RecordingRatingCalculator::new());
    let tournament = Tournament::new(calculator.clone(), SeatSettings::default());
    (tournament, calculator)
}

/// Seat every listed player at `seat_id`
pub fn seat_players(tournament: &mut Tournament, seat_id: &str, players: &[&str]) {
    for player in players {
        tournament
            .join(seat_id, player)
            .expect("player should be seated");
    }
}

pub fn ids(ids: &[&str]) -> Vec<PlayerId> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Table of `(id, rate, last_rank)` entries in the given order
pub fn table_of(players: &[(&str, i32, Option<u32>)]) -> PlayerTable {
    let mut table = PlayerTable::new();
    for (id, rate, last_rank) in players {
        let mut record = PlayerRecord::new(id, 50);
        record.rate = *rate;
        record.last_rank = *last_rank;
        table.insert(id.to_string(), record);
    }
    table
}
