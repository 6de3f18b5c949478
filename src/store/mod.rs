//! Storage seam used by result application.
//!
//! Result application only needs a handful of reads and writes. Anything that
//! implements [`ResultStore`] can back it: the SQLite transaction used in
//! production or the in-memory store used in tests.

use crate::domain::{Fight, FightId, FighterId, FighterStats, RankingEntry, WeightClassId};
use async_trait::async_trait;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteResultStore;

/// Reads and writes needed to apply one fight result.
///
/// Writes are only issued after every read and check has succeeded, so an
/// implementation without rollback still never sees a partial result.
#[async_trait]
pub trait ResultStore: Send {
    /// Load a fight record.
    async fn fight(&mut self, id: &FightId) -> Result<Option<Fight>, sqlx::Error>;

    /// Load a fighter's stats record.
    async fn stats(&mut self, fighter: &FighterId) -> Result<Option<FighterStats>, sqlx::Error>;

    /// Overwrite a fighter's stats record.
    async fn save_stats(&mut self, stats: &FighterStats) -> Result<(), sqlx::Error>;

    /// Entries of the division's most recent snapshot, empty if unranked.
    async fn latest_ranking_snapshot(
        &mut self,
        weight_class: &WeightClassId,
    ) -> Result<Vec<RankingEntry>, sqlx::Error>;

    /// Append a snapshot's entries as one batch.
    async fn save_ranking_entries(&mut self, entries: &[RankingEntry]) -> Result<(), sqlx::Error>;

    /// Persist the result fields of a fight.
    async fn save_fight_result(&mut self, fight: &Fight) -> Result<(), sqlx::Error>;
}
