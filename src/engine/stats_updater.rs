//! Applies a fight verdict to the two participants' statistics.

use crate::domain::{FightOutcome, FighterId, FighterStats, ResultKind, WinMethod};

use super::ResultError;

/// What an outcome means for the record books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Win {
        winner: FighterId,
        loser: FighterId,
        method: WinMethod,
    },
    Draw,
    NoContest,
}

impl Verdict {
    /// Resolve an outcome into a verdict.
    ///
    /// A decisive result type needs a winner; draws and no-contests must not
    /// have one. Winner membership is checked by the validator, not here.
    ///
    /// # Errors
    /// `InconsistentResult` when the result type and winner disagree.
    pub fn resolve(outcome: &FightOutcome) -> Result<Self, ResultError> {
        let inconsistent = || ResultError::InconsistentResult {
            result_type: outcome.result_type,
            has_winner: outcome.winner_id.is_some(),
        };

        match (outcome.result_type.kind(), &outcome.winner_id) {
            (ResultKind::Decisive(method), Some(winner)) => Ok(Verdict::Win {
                winner: winner.clone(),
                loser: outcome.opponent_of(winner).clone(),
                method,
            }),
            (ResultKind::Draw, None) => Ok(Verdict::Draw),
            (ResultKind::NoContest, None) => Ok(Verdict::NoContest),
            (ResultKind::Decisive(_), None)
            | (ResultKind::Draw, Some(_))
            | (ResultKind::NoContest, Some(_)) => Err(inconsistent()),
        }
    }

    /// Winner and loser, for decisive verdicts.
    pub fn decided(&self) -> Option<(&FighterId, &FighterId)> {
        match self {
            Verdict::Win { winner, loser, .. } => Some((winner, loser)),
            Verdict::Draw | Verdict::NoContest => None,
        }
    }
}

/// Apply `verdict` to both fighters' records and return them in the order given.
pub fn apply_verdict(
    verdict: &Verdict,
    mut first: FighterStats,
    mut second: FighterStats,
) -> [FighterStats; 2] {
    match verdict {
        Verdict::Win { winner, method, .. } => {
            let (won, lost) = if &first.fighter_id == winner {
                (&mut first, &mut second)
            } else {
                (&mut second, &mut first)
            };

            won.wins += 1;
            match method {
                WinMethod::Knockout => won.knockouts += 1,
                WinMethod::Submission => won.submissions += 1,
                WinMethod::Decision => won.decision_wins += 1,
                WinMethod::Disqualification => {}
            }
            lost.losses += 1;
        }
        Verdict::Draw => {
            first.draws += 1;
            second.draws += 1;
        }
        Verdict::NoContest => {
            first.no_contests += 1;
            second.no_contests += 1;
        }
    }

    [first, second]
}
