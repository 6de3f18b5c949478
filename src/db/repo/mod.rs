//! Repository layer for database operations.
//!
//! Methods are organized across submodules by table:
//! - `fights.rs` - Fight records and their result fields
//! - `stats.rs` - Fighter stats records
//! - `rankings.rs` - Ranking snapshots
//!
//! Each submodule exposes connection-level helpers so the same statements can
//! run on a pooled connection or inside a result transaction.

pub(crate) mod fights;
pub(crate) mod rankings;
pub(crate) mod stats;

pub use rankings::SeedError;

use crate::domain::{Fighter, FighterId, FighterStats, TimeMs, WeightClass, WeightClassId};
use sqlx::sqlite::{Sqlite, SqlitePool};
use sqlx::{Row, Transaction};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Repository for database operations.
///
/// Clones share the pool and the writer gate.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
    write_gate: Arc<Mutex<()>>,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository {
            pool,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Begin a multi-statement transaction that will write.
    ///
    /// SQLite has a single writer, and a deferred transaction that reads
    /// before it writes fails with SQLITE_BUSY instead of waiting when another
    /// writer got there first. Writers from this process therefore queue on
    /// the gate, which stays held until the returned guard is dropped.
    pub(crate) async fn begin_write(
        &self,
    ) -> Result<(Transaction<'static, Sqlite>, OwnedMutexGuard<()>), sqlx::Error> {
        let guard = self.write_gate.clone().lock_owned().await;
        let tx = self.pool.begin().await?;
        Ok((tx, guard))
    }

    // =========================================================================
    // Roster operations
    // =========================================================================

    /// Insert a weight class.
    ///
    /// # Errors
    /// Returns an error if the insert fails (e.g. duplicate name).
    pub async fn insert_weight_class(&self, weight_class: &WeightClass) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO weight_classes (id, name, limit_lbs) VALUES (?, ?, ?)")
            .bind(weight_class.id.as_str())
            .bind(&weight_class.name)
            .bind(i64::from(weight_class.limit_lbs))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Get a weight class by id.
    pub async fn weight_class(&self, id: &WeightClassId) -> Result<Option<WeightClass>, sqlx::Error> {
        let row = sqlx::query("SELECT id, name, limit_lbs FROM weight_classes WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| WeightClass {
            id: WeightClassId::new(r.get::<String, _>("id")),
            name: r.get("name"),
            limit_lbs: r.get::<i64, _>("limit_lbs") as u16,
        }))
    }

    /// Insert a fighter together with their zeroed stats record.
    ///
    /// Both rows are written in one transaction so a fighter never exists
    /// without a stats record.
    ///
    /// # Errors
    /// Returns an error if the transaction fails.
    pub async fn insert_fighter(&self, fighter: &Fighter) -> Result<FighterStats, sqlx::Error> {
        let now = TimeMs::now();
        let stats = FighterStats::new(fighter.id.clone());
        let (mut tx, _writer) = self.begin_write().await?;

        sqlx::query(
            r#"
            INSERT INTO fighters (id, first_name, last_name, nickname, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(fighter.id.as_str())
        .bind(&fighter.first_name)
        .bind(&fighter.last_name)
        .bind(fighter.nickname.as_deref())
        .bind(now.as_ms())
        .execute(&mut *tx)
        .await?;

        stats::insert_stats(&mut tx, &stats, now).await?;

        tx.commit().await?;
        Ok(stats)
    }

    /// Get a fighter by id.
    pub async fn fighter(&self, id: &FighterId) -> Result<Option<Fighter>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, nickname FROM fighters WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Fighter {
            id: FighterId::new(r.get::<String, _>("id")),
            first_name: r.get("first_name"),
            last_name: r.get("last_name"),
            nickname: r.get("nickname"),
        }))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn test_insert_fighter_creates_zeroed_stats() {
        let (repo, _temp) = setup_test_db().await;

        let created = repo.insert_fighter(&fighter("a")).await.expect("insert failed");
        assert_eq!(created.bouts(), 0);

        let loaded = repo
            .fighter_stats(&FighterId::new("a"))
            .await
            .expect("query failed")
            .expect("stats missing");
        assert_eq!(loaded, created);

        let f = repo.fighter(&FighterId::new("a")).await.unwrap().unwrap();
        assert_eq!(f.first_name, "A");
    }

    #[tokio::test]
    async fn test_duplicate_fighter_rolls_back() {
        let (repo, _temp) = setup_test_db().await;

        repo.insert_fighter(&fighter("a")).await.unwrap();
        assert!(repo.insert_fighter(&fighter("a")).await.is_err());
    }

    #[tokio::test]
    async fn test_weight_class_roundtrip() {
        let (repo, _temp) = setup_test_db().await;

        repo.insert_weight_class(&lightweight()).await.unwrap();
        let wc = repo
            .weight_class(&WeightClassId::new("lw"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(wc, lightweight());
        assert!(repo
            .weight_class(&WeightClassId::new("hw"))
            .await
            .unwrap()
            .is_none());
    }
}
