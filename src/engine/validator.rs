//! Checks that a recorded outcome is consistent with the stored fight.

use crate::domain::{Fight, FightOutcome};

use super::ResultError;

/// Validate `outcome` against the stored `fight`.
///
/// The outcome must name the same fight, division and pair of fighters (in
/// either order), and a winner, when present, must be one of the two.
///
/// # Errors
/// `FightMismatch` when the identifiers disagree, `InvalidResult` when the
/// winner is not a participant.
pub fn validate_outcome(outcome: &FightOutcome, fight: &Fight) -> Result<(), ResultError> {
    let mismatch = |reason: &str| ResultError::FightMismatch {
        fight: fight.id.clone(),
        reason: reason.to_string(),
    };

    if outcome.fight_id != fight.id {
        return Err(mismatch("fight id differs"));
    }
    if outcome.weight_class_id != fight.weight_class_id {
        return Err(mismatch("weight class differs"));
    }

    let same_pair = (outcome.fighter1_id == fight.fighter1_id
        && outcome.fighter2_id == fight.fighter2_id)
        || (outcome.fighter1_id == fight.fighter2_id && outcome.fighter2_id == fight.fighter1_id);
    if !same_pair {
        return Err(mismatch("participants differ"));
    }

    if let Some(winner) = &outcome.winner_id {
        if !fight.is_participant(winner) {
            return Err(ResultError::InvalidResult {
                fight: fight.id.clone(),
                winner: winner.clone(),
            });
        }
    }

    Ok(())
}
