//! Aggregate fight statistics per fighter.

use crate::domain::FighterId;
use serde::{Deserialize, Serialize};

/// Win/loss record and method counters for one fighter.
///
/// `wins` counts disqualification wins that have no method counter of their
/// own, so `knockouts + submissions + decision_wins <= wins` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FighterStats {
    pub fighter_id: FighterId,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub no_contests: u32,
    pub knockouts: u32,
    pub submissions: u32,
    pub decision_wins: u32,
}

impl FighterStats {
    /// The all-zero record a fighter starts with.
    pub fn new(fighter_id: FighterId) -> Self {
        Self {
            fighter_id,
            wins: 0,
            losses: 0,
            draws: 0,
            no_contests: 0,
            knockouts: 0,
            submissions: 0,
            decision_wins: 0,
        }
    }

    pub fn bouts(&self) -> u32 {
        self.wins + self.losses + self.draws + self.no_contests
    }

    /// Wins not attributed to a finishing or decision method.
    pub fn disqualification_wins(&self) -> u32 {
        self.wins
            .saturating_sub(self.knockouts + self.submissions + self.decision_wins)
    }
}
