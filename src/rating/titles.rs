//! Title assignment over the whole player table

use std::cmp::Reverse;

use tracing::debug;

use super::table::PlayerTable;
use crate::types::{PlayerId, Title};

/// Re-crown the top three players by rate.
///
/// Every title is cleared first. Players are ranked by rate descending with a
/// stable sort, so table order breaks ties.
pub fn assign_titles(table: &mut PlayerTable) {
    for record in table.records_mut() {
        record.title = None;
    }

    let mut ranked: Vec<(PlayerId, i32)> = table
        .iter()
        .map(|(id, record)| (id.clone(), record.rate))
        .collect();
    ranked.sort_by_key(|(_, rate)| Reverse(*rate));

    for (standing, (player_id, _)) in ranked.into_iter().take(Title::ALL.len()).enumerate() {
        let title = Title::for_standing(standing);
        if let (Some(title), Some(record)) = (title, table.get_mut(&player_id)) {
            debug!("Title {:?} -> {}", title, player_id);
            record.title = Some(title);
        }
    }
}

/// Current titleholders, best first
pub fn titleholders(table: &PlayerTable) -> Vec<(PlayerId, Title)> {
    let mut holders: Vec<(PlayerId, Title)> = table
        .iter()
        .filter_map(|(id, record)| record.title.map(|title| (id.clone(), title)))
        .collect();
    holders.sort_by_key(|(_, title)| *title as u8);
    holders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlayerRecord;

    fn table_with_rates(rates: &[(&str, i32)]) -> PlayerTable {
        let mut table = PlayerTable::new();
        for (id, rate) in rates {
            let mut record = PlayerRecord::new(id, 50);
            record.rate = *rate;
            table.insert(id.to_string(), record);
        }
        table
    }

    #[test]
    fn test_top_three_get_titles() {
        let mut table =
            table_with_rates(&[("a", 40), ("b", 70), ("c", 55), ("d", 62), ("e", 30)]);
        assign_titles(&mut table);

        assert_eq!(
            titleholders(&table),
            vec![
                ("b".to_string(), Title::First),
                ("d".to_string(), Title::Second),
                ("c".to_string(), Title::Third),
            ]
        );
        assert_eq!(table.get("a").unwrap().title, None);
        assert_eq!(table.get("e").unwrap().title, None);
    }

    #[test]
    fn test_stale_titles_are_cleared() {
        let mut table = table_with_rates(&[("a", 40), ("b", 70), ("c", 55), ("d", 62)]);
        table.get_mut("a").unwrap().title = Some(Title::First);

        assign_titles(&mut table);
        assert_eq!(table.get("a").unwrap().title, None);
        assert_eq!(table.get("b").unwrap().title, Some(Title::First));
    }

    #[test]
    fn test_ties_follow_table_order() {
        let mut table = table_with_rates(&[("a", 50), ("b", 60), ("c", 50), ("d", 50)]);
        assign_titles(&mut table);

        assert_eq!(table.get("b").unwrap().title, Some(Title::First));
        assert_eq!(table.get("a").unwrap().title, Some(Title::Second));
        assert_eq!(table.get("c").unwrap().title, Some(Title::Third));
        assert_eq!(table.get("d").unwrap().title, None);
    }

    #[test]
    fn test_fewer_than_three_players() {
        let mut table = table_with_rates(&[("a", 45), ("b", 52)]);
        assign_titles(&mut table);

        assert_eq!(table.get("b").unwrap().title, Some(Title::First));
        assert_eq!(table.get("a").unwrap().title, Some(Title::Second));
        assert_eq!(titleholders(&table).len(), 2);

        let mut empty = PlayerTable::new();
        assign_titles(&mut empty);
        assert!(titleholders(&empty).is_empty());
    }
}
