//! Insertion-ordered player table
//!
//! The table is the single mutable state the rating engine works on. Entry
//! order is meaningful: it breaks ties between equal rates, both for the
//! top-rated lookup and for title assignment.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::{RatingRules, MAX_SEAT_CAPACITY};
use crate::error::{Result, TournamentError};
use crate::types::{PlayerId, PlayerRecord};

/// Player records keyed by identifier, in first-insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerTable {
    entries: Vec<(PlayerId, PlayerRecord)>,
    index: HashMap<PlayerId, usize>,
}

impl PlayerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.index.contains_key(player_id)
    }

    pub fn get(&self, player_id: &str) -> Option<&PlayerRecord> {
        self.index.get(player_id).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, player_id: &str) -> Option<&mut PlayerRecord> {
        let i = *self.index.get(player_id)?;
        Some(&mut self.entries[i].1)
    }

    /// Insert or replace a record. A replaced record keeps its position.
    pub fn insert(&mut self, player_id: PlayerId, record: PlayerRecord) {
        match self.index.get(&player_id) {
            Some(&i) => self.entries[i].1 = record,
            None => {
                self.index.insert(player_id.clone(), self.entries.len());
                self.entries.push((player_id, record));
            }
        }
    }

    /// Create a default record for a first appearance.
    ///
    /// Returns `true` if a record was created; an existing record is left untouched.
    pub fn ensure_player(&mut self, player_id: &str, rules: &RatingRules) -> bool {
        if self.contains(player_id) {
            return false;
        }
        self.insert(
            player_id.to_string(),
            PlayerRecord::new(player_id, rules.initial_rate),
        );
        true
    }

    pub fn set_nickname(&mut self, player_id: &str, nickname: impl Into<String>) -> Result<()> {
        let record = self
            .get_mut(player_id)
            .ok_or_else(|| TournamentError::PlayerNotFound {
                player_id: player_id.to_string(),
            })?;
        record.nickname = nickname.into();
        Ok(())
    }

    /// Iterate records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &PlayerRecord)> {
        self.entries.iter().map(|(id, record)| (id, record))
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut PlayerRecord> {
        self.entries.iter_mut().map(|(_, record)| record)
    }

    /// Check records read back from storage against the rules in effect.
    ///
    /// Rates must sit at or above the floor and a recorded rank must be a
    /// position a seat can actually have.
    pub fn validate_records(&self, rules: &RatingRules) -> Result<()> {
        for (id, record) in &self.entries {
            if record.rate < rules.rate_floor {
                return Err(TournamentError::StorageError {
                    message: format!(
                        "{} has rate {} below the floor of {}",
                        id, record.rate, rules.rate_floor
                    ),
                }
                .into());
            }
            if let Some(rank) = record.last_rank {
                if rank == 0 || rank as usize > MAX_SEAT_CAPACITY {
                    return Err(TournamentError::StorageError {
                        message: format!(
                            "{} has last rank {}, expected 1..={}",
                            id, rank, MAX_SEAT_CAPACITY
                        ),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Player with the highest rate; the earliest entry wins a tie.
    ///
    /// Returns `None` only for an empty table.
    pub fn top_rated_player(&self) -> Option<&PlayerId> {
        let mut top: Option<(&PlayerId, i32)> = None;
        for (id, record) in &self.entries {
            if top.map_or(true, |(_, rate)| record.rate > rate) {
                top = Some((id, record.rate));
            }
        }
        top.map(|(id, _)| id)
    }
}

impl Serialize for PlayerTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, record) in &self.entries {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}

struct PlayerTableVisitor;

impl<'de> Visitor<'de> for PlayerTableVisitor {
    type Value = PlayerTable;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of player id to player record")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Self::Value, A::Error> {
        let mut table = PlayerTable::new();
        while let Some((id, record)) = access.next_entry::<PlayerId, PlayerRecord>()? {
            table.insert(id, record);
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for PlayerTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PlayerTableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_ensure_player_creates_once() {
        let rules = RatingRules::default();
        let mut table = PlayerTable::new();

        assert!(table.ensure_player("player01", &rules));
        table.get_mut("player01").unwrap().rate = 70;

        assert!(!table.ensure_player("player01", &rules));
        assert_eq!(table.get("player01").unwrap().rate, 70);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_insert_replace_keeps_position() {
        let mut table = table_with_rates(&[("a", 50), ("b", 50), ("c", 50)]);
        table.insert("a".to_string(), PlayerRecord::new("a", 99));

        let ids: Vec<_> = table.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(table.get("a").unwrap().rate, 99);
    }

    #[test]
    fn test_top_rated_player() {
        assert!(PlayerTable::new().top_rated_player().is_none());

        let table = table_with_rates(&[("a", 40), ("b", 61), ("c", 55)]);
        assert_eq!(table.top_rated_player().unwrap(), "b");
    }

    #[test]
    fn test_top_rated_tie_goes_to_earliest_entry() {
        let table = table_with_rates(&[("a", 40), ("b", 61), ("c", 61)]);
        assert_eq!(table.top_rated_player().unwrap(), "b");
    }

    #[test]
    fn test_set_nickname() {
        let mut table = table_with_rates(&[("a", 50)]);
        table.set_nickname("a", "Aki").unwrap();
        assert_eq!(table.get("a").unwrap().nickname, "Aki");

        let err = table.set_nickname("zz", "Nobody").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TournamentError>(),
            Some(TournamentError::PlayerNotFound { .. })
        ));
    }

    #[test]
    fn test_json_round_trip_preserves_order_and_fields() {
        let mut table = table_with_rates(&[("zeta", 44), ("alpha", 63), ("mid", 50)]);
        table.set_nickname("alpha", "Al").unwrap();
        table.get_mut("zeta").unwrap().last_rank = Some(3);

        let json = serde_json::to_string(&table).unwrap();
        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());

        let restored: PlayerTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);
        let ids: Vec<_> = restored.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_validate_records() {
        let rules = RatingRules::default();
        let mut table = table_with_rates(&[("a", 30), ("b", 75)]);
        table.get_mut("a").unwrap().last_rank = Some(6);
        assert!(table.validate_records(&rules).is_ok());

        let broken = [
            (29, None),
            (50, Some(0)),
            (50, Some(7)),
            (50, Some(2_000_000_000)),
        ];
        for (rate, last_rank) in broken {
            let mut bad = table.clone();
            let record = bad.get_mut("b").unwrap();
            record.rate = rate;
            record.last_rank = last_rank;

            let err = bad.validate_records(&rules).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<TournamentError>(),
                Some(TournamentError::StorageError { .. })
            ));
        }
    }
}
