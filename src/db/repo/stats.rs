//! Fighter stats operations for the repository.

use crate::domain::{FighterId, FighterStats, TimeMs};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;

use super::Repository;

impl Repository {
    /// Get a fighter's stats record.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn fighter_stats(
        &self,
        fighter: &FighterId,
    ) -> Result<Option<FighterStats>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        fetch_stats(&mut conn, fighter).await
    }
}

fn stats_from_row(row: &SqliteRow) -> FighterStats {
    let count = |col: &str| row.get::<i64, _>(col) as u32;
    FighterStats {
        fighter_id: FighterId::new(row.get::<String, _>("fighter_id")),
        wins: count("wins"),
        losses: count("losses"),
        draws: count("draws"),
        no_contests: count("no_contests"),
        knockouts: count("knockouts"),
        submissions: count("submissions"),
        decision_wins: count("decision_wins"),
    }
}

pub(crate) async fn fetch_stats(
    conn: &mut SqliteConnection,
    fighter: &FighterId,
) -> Result<Option<FighterStats>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT fighter_id, wins, losses, draws, no_contests,
               knockouts, submissions, decision_wins
        FROM fighter_stats
        WHERE fighter_id = ?
        "#,
    )
    .bind(fighter.as_str())
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.as_ref().map(stats_from_row))
}

pub(crate) async fn insert_stats(
    conn: &mut SqliteConnection,
    stats: &FighterStats,
    now: TimeMs,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO fighter_stats (
            fighter_id, wins, losses, draws, no_contests,
            knockouts, submissions, decision_wins, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(stats.fighter_id.as_str())
    .bind(i64::from(stats.wins))
    .bind(i64::from(stats.losses))
    .bind(i64::from(stats.draws))
    .bind(i64::from(stats.no_contests))
    .bind(i64::from(stats.knockouts))
    .bind(i64::from(stats.submissions))
    .bind(i64::from(stats.decision_wins))
    .bind(now.as_ms())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Overwrite an existing stats record.
///
/// Fails with `RowNotFound` if the fighter has no record; stats records are
/// only ever created alongside the fighter.
pub(crate) async fn update_stats(
    conn: &mut SqliteConnection,
    stats: &FighterStats,
    now: TimeMs,
) -> Result<(), sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE fighter_stats SET
            wins = ?, losses = ?, draws = ?, no_contests = ?,
            knockouts = ?, submissions = ?, decision_wins = ?, updated_at = ?
        WHERE fighter_id = ?
        "#,
    )
    .bind(i64::from(stats.wins))
    .bind(i64::from(stats.losses))
    .bind(i64::from(stats.draws))
    .bind(i64::from(stats.no_contests))
    .bind(i64::from(stats.knockouts))
    .bind(i64::from(stats.submissions))
    .bind(i64::from(stats.decision_wins))
    .bind(now.as_ms())
    .bind(stats.fighter_id.as_str())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(sqlx::Error::RowNotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn test_update_stats_overwrites_counters() {
        let (repo, _temp) = setup_test_db().await;
        let mut stats = repo.insert_fighter(&fighter("a")).await.unwrap();

        stats.wins = 3;
        stats.knockouts = 2;
        stats.decision_wins = 1;
        let mut conn = repo.pool().acquire().await.unwrap();
        update_stats(&mut conn, &stats, TimeMs::now()).await.unwrap();

        let loaded = fetch_stats(&mut conn, &FighterId::new("a"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, stats);
    }

    #[tokio::test]
    async fn test_update_missing_record_fails() {
        let (repo, _temp) = setup_test_db().await;
        let mut conn = repo.pool().acquire().await.unwrap();

        let err = update_stats(&mut conn, &FighterStats::new(FighterId::new("ghost")), TimeMs::now())
            .await
            .unwrap_err();
        assert!(matches!(err, sqlx::Error::RowNotFound));
    }
}
