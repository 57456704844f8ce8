//! Momentum rating pass
//!
//! Scores one seat's finish order against the player table. Each player's
//! point comes from how far they moved relative to their previous finishing
//! rank, with fixed overrides for a collapse from first to last and a climb
//! from last to first, damping for high rates, and a bonus for outperforming
//! the current leader's last rank. Titles are recomputed over the whole table
//! once every player in the order has been scored.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::table::PlayerTable;
use super::titles::assign_titles;
use crate::config::RatingRules;
use crate::error::{Result, TournamentError};
use crate::types::{PlayerId, PlayerRecord, RatingChange, RoundOutcome};
use crate::utils::scale_floor;

/// Check a finish order without touching the table
pub fn validate_order(table: &PlayerTable, finish_order: &[PlayerId]) -> Result<()> {
    if finish_order.is_empty() {
        return Err(reject("finish order is empty".to_string()));
    }

    let mut seen = HashSet::with_capacity(finish_order.len());
    for player_id in finish_order {
        if !table.contains(player_id) {
            return Err(reject(format!("unknown player {}", player_id)));
        }
        if !seen.insert(player_id.as_str()) {
            return Err(reject(format!("duplicate player {}", player_id)));
        }
    }

    Ok(())
}

fn reject(reason: String) -> anyhow::Error {
    warn!("Rejected finish order: {}", reason);
    TournamentError::invalid_order(reason).into()
}

/// Apply one round's finish order to the table.
///
/// The whole order is validated before any record changes. Players are scored
/// in finish order and the top-rated lookup is repeated for every player, so
/// rates already updated earlier in the pass are visible to later players.
pub fn score(
    table: &mut PlayerTable,
    finish_order: &[PlayerId],
    rules: &RatingRules,
) -> Result<RoundOutcome> {
    validate_order(table, finish_order)?;

    let seat_size = finish_order.len() as u32;
    let mut changes = Vec::with_capacity(finish_order.len());

    for (i, player_id) in finish_order.iter().enumerate() {
        let rank = i as u32 + 1;
        let change = if seat_size == 1 {
            score_solo(table, player_id)?
        } else {
            score_player(table, player_id, rank, seat_size, rules)?
        };
        changes.push(change);
    }

    assign_titles(table);

    info!(
        "Scored round of {} players: {}",
        seat_size,
        changes
            .iter()
            .map(|c| format!("{} {:+}", c.player_id, c.point))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(RoundOutcome { changes })
}

fn score_player(
    table: &mut PlayerTable,
    player_id: &str,
    rank: u32,
    seat_size: u32,
    rules: &RatingRules,
) -> Result<RatingChange> {
    let (old_rate, previous_rank) = {
        let record = lookup(table, player_id)?;
        (record.rate, record.last_rank)
    };

    // Unranked players count as having finished last
    let prev_rank = previous_rank.unwrap_or(seat_size);
    let diff = i64::from(prev_rank) - i64::from(rank);
    let mut point = saturate(diff.saturating_mul(i64::from(rules.momentum_multiplier)));

    if prev_rank == 1 && rank == seat_size {
        point = -rules.collapse_penalty;
    } else if prev_rank == seat_size && rank == 1 {
        point = rules.climb_reward;
    }

    if old_rate >= rules.damping_threshold {
        point = scale_floor(point, rules.damping_factor);
    }

    let usurped = match table.top_rated_player() {
        Some(top_id) => {
            let top = lookup(table, top_id)?;
            old_rate <= top.rate && top.last_rank.is_some_and(|top_rank| rank < top_rank)
        }
        None => {
            debug!("No top-rated player, skipping usurpation check");
            false
        }
    };
    if usurped {
        point = point.saturating_add(rules.usurpation_bonus);
    }

    let record = table
        .get_mut(player_id)
        .ok_or_else(|| TournamentError::PlayerNotFound {
            player_id: player_id.to_string(),
        })?;
    record.bonus = point;
    record.rate = old_rate.saturating_add(point).max(rules.rate_floor);
    record.last_rank = Some(rank);

    debug!(
        "{}: prev rank {} -> {}, rate {} -> {} ({:+}{})",
        player_id,
        prev_rank,
        rank,
        old_rate,
        record.rate,
        point,
        if usurped { ", usurpation" } else { "" }
    );

    Ok(RatingChange {
        player_id: player_id.to_string(),
        previous_rank,
        rank,
        old_rate,
        new_rate: record.rate,
        point,
        usurped,
    })
}

/// A one-player order carries no information about relative standing, so the
/// rate is left alone and only the rank is recorded.
fn score_solo(table: &mut PlayerTable, player_id: &str) -> Result<RatingChange> {
    let record = table
        .get_mut(player_id)
        .ok_or_else(|| TournamentError::PlayerNotFound {
            player_id: player_id.to_string(),
        })?;
    let previous_rank = record.last_rank;
    record.bonus = 0;
    record.last_rank = Some(1);

    debug!("{}: single-player round, rate unchanged", player_id);

    Ok(RatingChange {
        player_id: player_id.to_string(),
        previous_rank,
        rank: 1,
        old_rate: record.rate,
        new_rate: record.rate,
        point: 0,
        usurped: false,
    })
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn lookup<'a>(table: &'a PlayerTable, player_id: &str) -> Result<&'a PlayerRecord> {
    table.get(player_id).ok_or_else(|| {
        TournamentError::PlayerNotFound {
            player_id: player_id.to_string(),
        }
        .into()
    })
}
