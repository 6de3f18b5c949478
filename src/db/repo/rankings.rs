//! Ranking snapshot operations for the repository.

use crate::domain::{
    is_contiguous_ladder, FighterId, Points, RankingEntry, RankingSnapshot, TimeMs, WeightClassId,
};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;
use thiserror::Error;
use tracing::warn;

use super::Repository;

const ENTRY_COLUMNS: &str =
    "fighter_id, weight_class_id, position, points, previous_position, ranked_at";

impl Repository {
    /// Current ladder of a division, truncated to the top `limit` positions.
    ///
    /// Returns None if the division has never been ranked.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn current_ranking(
        &self,
        weight_class: &WeightClassId,
        limit: u32,
    ) -> Result<Option<RankingSnapshot>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let mut entries = fetch_latest_snapshot(&mut conn, weight_class).await?;
        entries.truncate(limit as usize);
        Ok(RankingSnapshot::from_entries(entries))
    }

    /// The `limit` most recent snapshots of a division, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn ranking_history(
        &self,
        weight_class: &WeightClassId,
        limit: u32,
    ) -> Result<Vec<RankingSnapshot>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM rankings
            WHERE weight_class_id = ?
              AND ranked_at IN (
                SELECT DISTINCT ranked_at FROM rankings
                WHERE weight_class_id = ?
                ORDER BY ranked_at DESC
                LIMIT ?
              )
            ORDER BY ranked_at DESC, position ASC
            "#
        );
        let rows = sqlx::query(&sql)
            .bind(weight_class.as_str())
            .bind(weight_class.as_str())
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        let mut snapshots: Vec<RankingSnapshot> = Vec::new();
        let mut current: Vec<RankingEntry> = Vec::new();
        for entry in rows.iter().map(entry_from_row) {
            if current.first().is_some_and(|e| e.ranked_at != entry.ranked_at) {
                snapshots.extend(RankingSnapshot::from_entries(std::mem::take(&mut current)));
            }
            current.push(entry);
        }
        snapshots.extend(RankingSnapshot::from_entries(current));

        Ok(snapshots)
    }

    /// Store a hand-built snapshot, e.g. to seed a division's first ladder.
    ///
    /// # Errors
    /// Returns [`SeedError`] if the entries do not form one complete ladder
    /// (one division, one instant, positions `1..=N`), or if any entry
    /// violates a constraint. Nothing is stored on error.
    pub async fn seed_ranking_snapshot(&self, entries: &[RankingEntry]) -> Result<(), SeedError> {
        check_seed(entries)?;
        let (mut tx, _writer) = self.begin_write().await?;
        insert_entries(&mut tx, entries).await?;
        tx.commit().await?;
        Ok(())
    }
}

/// Reasons a hand-built snapshot is refused.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("ranking snapshot has no entries")]
    Empty,
    #[error("ranking snapshot mixes weight classes or timestamps")]
    Mixed,
    #[error("ranking snapshot positions are not 1..={0} without gaps or duplicates")]
    NotContiguous(usize),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

fn check_seed(entries: &[RankingEntry]) -> Result<(), SeedError> {
    let first = entries.first().ok_or(SeedError::Empty)?;
    if entries
        .iter()
        .any(|e| e.weight_class_id != first.weight_class_id || e.ranked_at != first.ranked_at)
    {
        return Err(SeedError::Mixed);
    }
    if !is_contiguous_ladder(entries) {
        return Err(SeedError::NotContiguous(entries.len()));
    }
    Ok(())
}

fn entry_from_row(row: &SqliteRow) -> RankingEntry {
    let fighter_id = FighterId::new(row.get::<String, _>("fighter_id"));
    let points_str: String = row.get("points");
    let points = Points::parse(&points_str).unwrap_or_else(|e| {
        warn!(
            fighter_id = %fighter_id,
            points = %points_str,
            error = %e,
            "Failed to parse ranking points, using zero"
        );
        Points::zero()
    });

    RankingEntry {
        fighter_id,
        weight_class_id: WeightClassId::new(row.get::<String, _>("weight_class_id")),
        position: row.get::<i64, _>("position") as u32,
        points,
        previous_position: row
            .get::<Option<i64>, _>("previous_position")
            .map(|p| p as u32),
        ranked_at: TimeMs::new(row.get("ranked_at")),
    }
}

/// Entries of the division's most recent snapshot, ordered by position.
pub(crate) async fn fetch_latest_snapshot(
    conn: &mut SqliteConnection,
    weight_class: &WeightClassId,
) -> Result<Vec<RankingEntry>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {ENTRY_COLUMNS}
        FROM rankings
        WHERE weight_class_id = ?
          AND ranked_at = (SELECT MAX(ranked_at) FROM rankings WHERE weight_class_id = ?)
        ORDER BY position ASC
        "#
    );
    let rows = sqlx::query(&sql)
        .bind(weight_class.as_str())
        .bind(weight_class.as_str())
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows.iter().map(entry_from_row).collect())
}

pub(crate) async fn insert_entries(
    conn: &mut SqliteConnection,
    entries: &[RankingEntry],
) -> Result<(), sqlx::Error> {
    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO rankings (
                fighter_id, weight_class_id, position, points, previous_position, ranked_at
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.fighter_id.as_str())
        .bind(entry.weight_class_id.as_str())
        .bind(i64::from(entry.position))
        .bind(entry.points.to_canonical_string())
        .bind(entry.previous_position.map(i64::from))
        .bind(entry.ranked_at.as_ms())
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
