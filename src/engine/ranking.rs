//! Incremental ladder recomputation.
//!
//! Each decided fight turns the division's latest snapshot into the next one.
//! At most one fighter changes position by more than one slot: the winner of
//! an upset takes the loser's slot and everyone from that slot down to the
//! winner's old slot shifts down by one. Everybody else is carried forward so
//! that the new snapshot is a complete ladder again.

use crate::domain::{
    is_contiguous_ladder, FighterId, Points, RankingEntry, RankingSnapshot, TimeMs, WeightClassId,
};
use tracing::{debug, warn};

/// Point awards and fallbacks used when recomputing a ladder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingPolicy {
    /// Added to a ranked winner's points on an upset.
    pub upset_bonus: Points,
    /// Points given to a previously unranked winner.
    pub entrant_points: Points,
    /// Added to the winner's points when no positions change.
    pub expected_win_bonus: Points,
    /// Bottom-of-ladder slot assumed for a loser without a position.
    ///
    /// A ranked winner over an unranked loser always keeps its slot, so no
    /// ladder case moves anyone to this slot.
    pub unranked_floor: u32,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            upset_bonus: Points::from_whole(25),
            entrant_points: Points::from_whole(25),
            expected_win_bonus: Points::from_whole(10),
            unranked_floor: 15,
        }
    }
}

/// How a decided fight moves the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LadderCase {
    /// Winner takes `target`. Entries at `target` and below shift down one,
    /// stopping before `vacated` (the winner's old slot) if there was one.
    Upset { target: u32, vacated: Option<u32> },
    /// Winner keeps `position` and collects the expected-win bonus.
    ExpectedWin { position: u32 },
    /// Neither fighter is ranked: nothing to do.
    Unranked,
}

impl LadderCase {
    fn shifts(&self, position: u32) -> bool {
        match *self {
            LadderCase::Upset { target, vacated } => {
                position >= target && vacated.map_or(true, |v| position < v)
            }
            LadderCase::ExpectedWin { .. } | LadderCase::Unranked => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    policy: RankingPolicy,
}

impl RankingEngine {
    pub fn new(policy: RankingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    /// Decide which case applies given the fighters' prior entries.
    pub fn classify(
        &self,
        winner: Option<&RankingEntry>,
        loser: Option<&RankingEntry>,
    ) -> LadderCase {
        match (winner, loser) {
            (None, None) => LadderCase::Unranked,
            (None, Some(l)) => LadderCase::Upset {
                target: l.position,
                vacated: None,
            },
            (Some(w), Some(l)) if w.position > l.position => LadderCase::Upset {
                target: l.position,
                vacated: Some(w.position),
            },
            (Some(w), Some(_)) => LadderCase::ExpectedWin {
                position: w.position,
            },
            (Some(w), None) => LadderCase::ExpectedWin {
                position: w.position,
            },
        }
    }

    /// Compute the division's next snapshot after `winner` beat `loser`.
    ///
    /// `prior` is the division's latest snapshot. The new snapshot is stamped
    /// `now`, or one millisecond after the prior snapshot if the clock has not
    /// moved past it. Returns None when neither fighter is ranked.
    pub fn recompute(
        &self,
        weight_class_id: &WeightClassId,
        prior: &[RankingEntry],
        winner: &FighterId,
        loser: &FighterId,
        now: TimeMs,
    ) -> Option<RankingSnapshot> {
        let winner_entry = prior.iter().find(|e| &e.fighter_id == winner);
        let loser_entry = prior.iter().find(|e| &e.fighter_id == loser);

        let case = self.classify(winner_entry, loser_entry);
        debug!(
            weight_class = %weight_class_id,
            winner = %winner,
            loser = %loser,
            ?case,
            "Classified ranking change"
        );

        if case == LadderCase::Unranked {
            return None;
        }

        if !is_contiguous_ladder(prior) {
            warn!(
                weight_class = %weight_class_id,
                entries = prior.len(),
                "Prior ranking snapshot has gaps or duplicate positions"
            );
        }

        let ranked_at = match prior.iter().map(|e| e.ranked_at).max() {
            Some(latest) if latest >= now => latest.succ(),
            _ => now,
        };

        let carry = |entry: &RankingEntry, position: u32, points: Points| RankingEntry {
            fighter_id: entry.fighter_id.clone(),
            weight_class_id: weight_class_id.clone(),
            position,
            points,
            previous_position: Some(entry.position),
            ranked_at,
        };

        let mut entries: Vec<RankingEntry> = prior
            .iter()
            .map(|entry| {
                if &entry.fighter_id == winner {
                    return match case {
                        LadderCase::Upset { target, .. } => {
                            carry(entry, target, entry.points + self.policy.upset_bonus)
                        }
                        _ => carry(
                            entry,
                            entry.position,
                            entry.points + self.policy.expected_win_bonus,
                        ),
                    };
                }
                let position = if case.shifts(entry.position) {
                    entry.position + 1
                } else {
                    entry.position
                };
                carry(entry, position, entry.points)
            })
            .collect();

        if let (None, LadderCase::Upset { target, .. }) = (winner_entry, case) {
            entries.push(RankingEntry {
                fighter_id: winner.clone(),
                weight_class_id: weight_class_id.clone(),
                position: target,
                points: self.policy.entrant_points,
                previous_position: None,
                ranked_at,
            });
        }

        RankingSnapshot::from_entries(entries)
    }
}
