//! Ranking snapshot entries.

use crate::domain::{FighterId, Points, TimeMs, WeightClassId};
use serde::{Deserialize, Serialize};

/// One fighter's place in one division as of `ranked_at`.
///
/// Entries are never updated once written. All entries of a division that
/// share `ranked_at` form one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub fighter_id: FighterId,
    pub weight_class_id: WeightClassId,
    pub position: u32,
    pub points: Points,
    pub previous_position: Option<u32>,
    pub ranked_at: TimeMs,
}

impl RankingEntry {
    /// Positions gained since the previous snapshot (negative when dropping).
    pub fn movement(&self) -> Option<i64> {
        self.previous_position
            .map(|prev| i64::from(prev) - i64::from(self.position))
    }
}

/// A complete ladder for one division at one instant, ordered by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSnapshot {
    pub weight_class_id: WeightClassId,
    pub ranked_at: TimeMs,
    pub entries: Vec<RankingEntry>,
}

impl RankingSnapshot {
    /// Group entries into a snapshot, sorting by position.
    ///
    /// Returns None for an empty set.
    pub fn from_entries(mut entries: Vec<RankingEntry>) -> Option<Self> {
        let first = entries.first()?;
        let weight_class_id = first.weight_class_id.clone();
        let ranked_at = first.ranked_at;
        entries.sort_by_key(|e| e.position);
        Some(Self {
            weight_class_id,
            ranked_at,
            entries,
        })
    }

    pub fn entry_for(&self, fighter: &FighterId) -> Option<&RankingEntry> {
        self.entries.iter().find(|e| &e.fighter_id == fighter)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when positions are exactly `1..=len` and every entry belongs to
    /// this division and instant.
    pub fn is_well_formed(&self) -> bool {
        is_contiguous_ladder(&self.entries)
            && self
                .entries
                .iter()
                .all(|e| e.weight_class_id == self.weight_class_id && e.ranked_at == self.ranked_at)
    }
}

/// Check that the positions of `entries` form `1..=N` with no duplicates.
pub fn is_contiguous_ladder(entries: &[RankingEntry]) -> bool {
    let mut positions: Vec<u32> = entries.iter().map(|e| e.position).collect();
    positions.sort_unstable();
    positions
        .iter()
        .enumerate()
        .all(|(i, &p)| p as usize == i + 1)
}
