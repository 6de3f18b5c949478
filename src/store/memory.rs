//! In-memory result store for tests and dry runs.

use super::ResultStore;
use crate::domain::{Fight, FightId, FighterId, FighterStats, RankingEntry, WeightClassId};
use async_trait::async_trait;
use std::collections::HashMap;

/// Result store holding everything in maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    fights: HashMap<FightId, Fight>,
    stats: HashMap<FighterId, FighterStats>,
    rankings: Vec<RankingEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fight record.
    pub fn with_fight(mut self, fight: Fight) -> Self {
        self.fights.insert(fight.id.clone(), fight);
        self
    }

    /// Add a zeroed stats record for each fighter.
    pub fn with_fighters<'a>(mut self, fighters: impl IntoIterator<Item = &'a FighterId>) -> Self {
        for id in fighters {
            self.stats.insert(id.clone(), FighterStats::new(id.clone()));
        }
        self
    }

    /// Add or replace a stats record.
    pub fn with_stats(mut self, stats: FighterStats) -> Self {
        self.stats.insert(stats.fighter_id.clone(), stats);
        self
    }

    /// Seed ranking entries.
    pub fn with_rankings(mut self, entries: Vec<RankingEntry>) -> Self {
        self.rankings.extend(entries);
        self
    }

    pub fn fight_record(&self, id: &FightId) -> Option<&Fight> {
        self.fights.get(id)
    }

    pub fn stats_for(&self, fighter: &FighterId) -> Option<&FighterStats> {
        self.stats.get(fighter)
    }

    /// Every ranking entry ever stored for the division, oldest first.
    pub fn ranking_history(&self, weight_class: &WeightClassId) -> Vec<&RankingEntry> {
        let mut entries: Vec<&RankingEntry> = self
            .rankings
            .iter()
            .filter(|e| &e.weight_class_id == weight_class)
            .collect();
        entries.sort_by_key(|e| (e.ranked_at, e.position));
        entries
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn fight(&mut self, id: &FightId) -> Result<Option<Fight>, sqlx::Error> {
        Ok(self.fights.get(id).cloned())
    }

    async fn stats(&mut self, fighter: &FighterId) -> Result<Option<FighterStats>, sqlx::Error> {
        Ok(self.stats.get(fighter).cloned())
    }

    async fn save_stats(&mut self, stats: &FighterStats) -> Result<(), sqlx::Error> {
        self.stats.insert(stats.fighter_id.clone(), stats.clone());
        Ok(())
    }

    async fn latest_ranking_snapshot(
        &mut self,
        weight_class: &WeightClassId,
    ) -> Result<Vec<RankingEntry>, sqlx::Error> {
        let division = self
            .rankings
            .iter()
            .filter(|e| &e.weight_class_id == weight_class);
        let Some(latest) = division.clone().map(|e| e.ranked_at).max() else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<RankingEntry> = division
            .filter(|e| e.ranked_at == latest)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.position);
        Ok(entries)
    }

    async fn save_ranking_entries(&mut self, entries: &[RankingEntry]) -> Result<(), sqlx::Error> {
        self.rankings.extend_from_slice(entries);
        Ok(())
    }

    async fn save_fight_result(&mut self, fight: &Fight) -> Result<(), sqlx::Error> {
        self.fights.insert(fight.id.clone(), fight.clone());
        Ok(())
    }
}
