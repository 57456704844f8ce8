//! Standings view and CSV export

use std::cmp::Reverse;

use serde::Serialize;

use crate::rating::PlayerTable;
use crate::types::{PlayerId, Title};

/// One line of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingRow {
    pub position: usize,
    pub player_id: PlayerId,
    pub nickname: String,
    pub rate: i32,
    pub bonus: i32,
    pub last_rank: Option<u32>,
    pub title: Option<Title>,
}

/// Players ordered by rate, best first; table order breaks ties
pub fn standings(table: &PlayerTable) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = table
        .iter()
        .map(|(id, record)| StandingRow {
            position: 0,
            player_id: id.clone(),
            nickname: record.nickname.clone(),
            rate: record.rate,
            bonus: record.bonus,
            last_rank: record.last_rank,
            title: record.title,
        })
        .collect();
    rows.sort_by_key(|row| Reverse(row.rate));
    for (i, row) in rows.iter_mut().enumerate() {
        row.position = i + 1;
    }
    rows
}

const CSV_HEADER: &str = "ID,Nickname,Rate,LastRank,Bonus,Title";

/// Render the table as CSV in table order
pub fn to_csv(table: &PlayerTable) -> String {
    let mut out = String::from(CSV_HEADER);
    for (id, record) in table.iter() {
        let last_rank = record.last_rank.map(|r| r.to_string()).unwrap_or_default();
        let title = record.title.map(|t| t.to_string()).unwrap_or_default();
        out.push('\n');
        out.push_str(
            &[
                csv_field(id),
                csv_field(&record.nickname),
                record.rate.to_string(),
                last_rank,
                record.bonus.to_string(),
                csv_field(&title),
            ]
            .join(","),
        );
    }
    out
}

/// Quote a field if it contains a separator, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
