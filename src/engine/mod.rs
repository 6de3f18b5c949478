//! Pure result-application engine: validation, stats and ladder recomputation.
//!
//! Nothing in here touches storage. Callers read the inputs, run the engine
//! and persist whatever it returns.

use crate::domain::{FightId, FighterId, ResultType};
use thiserror::Error;

pub mod ranking;
pub mod stats_updater;
pub mod validator;

pub use ranking::{LadderCase, RankingEngine, RankingPolicy};
pub use stats_updater::{apply_verdict, Verdict};
pub use validator::validate_outcome;

/// Reasons a fight result cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultError {
    #[error("winner {winner} is not a participant in fight {fight}")]
    InvalidResult { fight: FightId, winner: FighterId },

    #[error("fighter {0} has no stats record")]
    MissingStatsRecord(FighterId),

    #[error("result type {result_type} cannot be recorded {}", winner_phrase(.has_winner))]
    InconsistentResult {
        result_type: ResultType,
        has_winner: bool,
    },

    #[error("fight {0} not found")]
    FightNotFound(FightId),

    #[error("outcome does not match fight {fight}: {reason}")]
    FightMismatch { fight: FightId, reason: String },
}

fn winner_phrase(has_winner: &bool) -> &'static str {
    if *has_winner {
        "with a winner"
    } else {
        "without a winner"
    }
}
