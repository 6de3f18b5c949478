//! Fight record operations for the repository.

use crate::domain::{Fight, FightId, FighterId, FinishDetails, ResultType, TimeMs, WeightClassId};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;
use tracing::warn;

use super::Repository;

impl Repository {
    /// Insert a scheduled fight.
    ///
    /// # Errors
    /// Returns `Protocol` if both corners name the same fighter, or any
    /// database error (unknown fighter or weight class, duplicate id).
    pub async fn insert_fight(&self, fight: &Fight) -> Result<(), sqlx::Error> {
        if fight.fighter1_id == fight.fighter2_id {
            return Err(sqlx::Error::Protocol(format!(
                "fighter {} cannot fight themselves",
                fight.fighter1_id
            )));
        }

        sqlx::query(
            r#"
            INSERT INTO fights (
                id, weight_class_id, fighter1_id, fighter2_id,
                scheduled_rounds, is_title_fight
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(fight.id.as_str())
        .bind(fight.weight_class_id.as_str())
        .bind(fight.fighter1_id.as_str())
        .bind(fight.fighter2_id.as_str())
        .bind(i64::from(fight.scheduled_rounds))
        .bind(fight.is_title_fight)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a fight by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn fight(&self, id: &FightId) -> Result<Option<Fight>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        fetch_fight(&mut conn, id).await
    }
}

fn fight_from_row(row: &SqliteRow) -> Fight {
    let id: String = row.get("id");
    let result_type = row
        .get::<Option<String>, _>("result_type")
        .and_then(|raw| match raw.parse::<ResultType>() {
            Ok(rt) => Some(rt),
            Err(e) => {
                warn!(fight_id = %id, error = %e, "Ignoring unreadable result type");
                None
            }
        });
    let small = |col: &str| row.get::<Option<i64>, _>(col).map(|v| v as u8);

    Fight {
        id: FightId::new(id),
        weight_class_id: WeightClassId::new(row.get::<String, _>("weight_class_id")),
        fighter1_id: FighterId::new(row.get::<String, _>("fighter1_id")),
        fighter2_id: FighterId::new(row.get::<String, _>("fighter2_id")),
        scheduled_rounds: row.get::<i64, _>("scheduled_rounds") as u8,
        is_title_fight: row.get("is_title_fight"),
        result_type,
        winner_id: row.get::<Option<String>, _>("winner_id").map(FighterId::new),
        finish: FinishDetails {
            actual_rounds: small("actual_rounds"),
            finish_round: small("finish_round"),
            finish_time: row.get("finish_time"),
        },
        decided_at: row.get::<Option<i64>, _>("decided_at").map(TimeMs::new),
    }
}

pub(crate) async fn fetch_fight(
    conn: &mut SqliteConnection,
    id: &FightId,
) -> Result<Option<Fight>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, weight_class_id, fighter1_id, fighter2_id, scheduled_rounds,
               is_title_fight, result_type, winner_id, actual_rounds,
               finish_round, finish_time, decided_at
        FROM fights
        WHERE id = ?
        "#,
    )
    .bind(id.as_str())
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.as_ref().map(fight_from_row))
}

/// Write the result fields of `fight`. Scheduling fields are left alone.
pub(crate) async fn update_fight_result(
    conn: &mut SqliteConnection,
    fight: &Fight,
) -> Result<(), sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE fights SET
            result_type = ?, winner_id = ?, actual_rounds = ?,
            finish_round = ?, finish_time = ?, decided_at = ?
        WHERE id = ?
        "#,
    )
    .bind(fight.result_type.map(|rt| rt.as_str()))
    .bind(fight.winner_id.as_ref().map(|w| w.as_str()))
    .bind(fight.finish.actual_rounds.map(i64::from))
    .bind(fight.finish.finish_round.map(i64::from))
    .bind(fight.finish.finish_time.as_deref())
    .bind(fight.decided_at.map(|t| t.as_ms()))
    .bind(fight.id.as_str())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(sqlx::Error::RowNotFound);
    }
    Ok(())
}
