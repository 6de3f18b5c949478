//! Result store backed by one SQLite transaction.

use super::ResultStore;
use crate::db::repo::{fights, rankings, stats};
use crate::db::Repository;
use crate::domain::{Fight, FightId, FighterId, FighterStats, RankingEntry, TimeMs, WeightClassId};
use async_trait::async_trait;
use sqlx::sqlite::Sqlite;
use sqlx::Transaction;
use tokio::sync::OwnedMutexGuard;

/// All reads and writes of one result application, inside one transaction.
///
/// Nothing is visible to other connections until [`commit`](Self::commit).
/// Dropping the store without committing rolls everything back. The store
/// holds the repository's writer gate for its whole lifetime.
pub struct SqliteResultStore {
    tx: Transaction<'static, Sqlite>,
    _writer: OwnedMutexGuard<()>,
}

impl SqliteResultStore {
    /// Wait for the writer gate, then open a transaction.
    pub async fn begin(repo: &Repository) -> Result<Self, sqlx::Error> {
        let (tx, writer) = repo.begin_write().await?;
        Ok(Self {
            tx,
            _writer: writer,
        })
    }

    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }

    pub async fn rollback(self) -> Result<(), sqlx::Error> {
        self.tx.rollback().await
    }
}

#[async_trait]
impl ResultStore for SqliteResultStore {
    async fn fight(&mut self, id: &FightId) -> Result<Option<Fight>, sqlx::Error> {
        fights::fetch_fight(&mut self.tx, id).await
    }

    async fn stats(&mut self, fighter: &FighterId) -> Result<Option<FighterStats>, sqlx::Error> {
        stats::fetch_stats(&mut self.tx, fighter).await
    }

    async fn save_stats(&mut self, record: &FighterStats) -> Result<(), sqlx::Error> {
        stats::update_stats(&mut self.tx, record, TimeMs::now()).await
    }

    async fn latest_ranking_snapshot(
        &mut self,
        weight_class: &WeightClassId,
    ) -> Result<Vec<RankingEntry>, sqlx::Error> {
        rankings::fetch_latest_snapshot(&mut self.tx, weight_class).await
    }

    async fn save_ranking_entries(&mut self, entries: &[RankingEntry]) -> Result<(), sqlx::Error> {
        rankings::insert_entries(&mut self.tx, entries).await
    }

    async fn save_fight_result(&mut self, fight: &Fight) -> Result<(), sqlx::Error> {
        fights::update_fight_result(&mut self.tx, fight).await
    }
}
