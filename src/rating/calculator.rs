//! Rating calculator trait and the momentum implementation
//!
//! The tournament drives scoring through this trait so alternative rule sets
//! (or recording doubles in tests) can be swapped in.

use crate::config::RatingRules;
use crate::error::Result;
use crate::rating::engine;
use crate::rating::table::PlayerTable;
use crate::types::{PlayerId, RoundOutcome};

/// Trait for applying a finished round to the player table
pub trait RatingCalculator: Send + Sync {
    /// Score a finish order, mutating the table in place
    ///
    /// # Arguments
    /// * `table` - Every known player; titles are recomputed across all of them
    /// * `finish_order` - Player ids, winner first
    fn score_round(&self, table: &mut PlayerTable, finish_order: &[PlayerId])
        -> Result<RoundOutcome>;

    /// Rules currently in effect, including the rate new players start at
    fn rules(&self) -> &RatingRules;
}

/// Calculator applying the momentum rules
#[derive(Debug, Clone, Default)]
pub struct MomentumRatingCalculator {
    rules: RatingRules,
}

impl MomentumRatingCalculator {
    /// Create a calculator, rejecting invalid rules
    pub fn new(rules: RatingRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }
}

impl RatingCalculator for MomentumRatingCalculator {
    fn score_round(
        &self,
        table: &mut PlayerTable,
        finish_order: &[PlayerId],
    ) -> Result<RoundOutcome> {
        engine::score(table, finish_order, &self.rules)
    }

    fn rules(&self) -> &RatingRules {
        &self.rules
    }
}
