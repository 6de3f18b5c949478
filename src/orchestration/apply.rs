//! Result application: validator, stats updater and ranking engine in sequence.

use crate::domain::{
    Fight, FightOutcome, FighterId, FighterStats, RankingSnapshot, TimeMs,
};
use crate::engine::{apply_verdict, validate_outcome, RankingEngine, ResultError, Verdict};
use crate::store::ResultStore;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// What a successful result application changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedFightRecord {
    pub fight: Fight,
    /// Stats of fighter 1 and fighter 2, in the fight's corner order.
    pub stats: [FighterStats; 2],
    /// The division's new snapshot, if the ladder changed.
    pub ranking: Option<RankingSnapshot>,
}

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Result(#[from] ResultError),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Applies fight outcomes against a [`ResultStore`].
#[derive(Debug, Clone, Default)]
pub struct ResultApplier {
    ranking: RankingEngine,
}

impl ResultApplier {
    pub fn new(ranking: RankingEngine) -> Self {
        Self { ranking }
    }

    pub fn ranking_engine(&self) -> &RankingEngine {
        &self.ranking
    }

    /// Apply `outcome` at time `now`.
    ///
    /// Every read and check happens before the first write, so a failing
    /// outcome leaves the store untouched. Applying the same outcome twice
    /// counts it twice; guarding against that is the caller's job.
    ///
    /// # Errors
    /// Any [`ResultError`] from validation, or a store error.
    pub async fn apply<S: ResultStore + ?Sized>(
        &self,
        store: &mut S,
        outcome: &FightOutcome,
        now: TimeMs,
    ) -> Result<UpdatedFightRecord, ApplyError> {
        let fight = store
            .fight(&outcome.fight_id)
            .await?
            .ok_or_else(|| ResultError::FightNotFound(outcome.fight_id.clone()))?;

        validate_outcome(outcome, &fight)?;
        let verdict = Verdict::resolve(outcome)?;

        let first = load_stats(store, &fight.fighter1_id).await?;
        let second = load_stats(store, &fight.fighter2_id).await?;
        let stats = apply_verdict(&verdict, first, second);

        let ranking = match verdict.decided() {
            Some((winner, loser)) => {
                let prior = store.latest_ranking_snapshot(&fight.weight_class_id).await?;
                self.ranking
                    .recompute(&fight.weight_class_id, &prior, winner, loser, now)
            }
            None => None,
        };

        let mut decided = fight;
        decided.result_type = Some(outcome.result_type);
        decided.winner_id = outcome.winner_id.clone();
        decided.finish = outcome.finish.clone();
        decided.decided_at = Some(now);

        store.save_fight_result(&decided).await?;
        for record in &stats {
            store.save_stats(record).await?;
        }
        if let Some(snapshot) = &ranking {
            store.save_ranking_entries(&snapshot.entries).await?;
        }

        match &ranking {
            Some(snapshot) => info!(
                fight_id = %decided.id,
                result_type = %outcome.result_type,
                weight_class = %decided.weight_class_id,
                ranked = snapshot.len(),
                ranked_at = snapshot.ranked_at.as_ms(),
                "Applied fight result with new ranking snapshot"
            ),
            None => info!(
                fight_id = %decided.id,
                result_type = %outcome.result_type,
                "Applied fight result without ranking change"
            ),
        }

        Ok(UpdatedFightRecord {
            fight: decided,
            stats,
            ranking,
        })
    }
}

async fn load_stats<S: ResultStore + ?Sized>(
    store: &mut S,
    fighter: &FighterId,
) -> Result<FighterStats, ApplyError> {
    let stats = store.stats(fighter).await?;
    debug!(fighter_id = %fighter, found = stats.is_some(), "Loaded fighter stats");
    stats.ok_or_else(|| ResultError::MissingStatsRecord(fighter.clone()).into())
}
