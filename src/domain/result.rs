//! Fight result types.

use crate::domain::{FightId, FighterId, WeightClassId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultType {
    Knockout,
    TechnicalKnockout,
    Submission,
    DecisionUnanimous,
    DecisionSplit,
    DecisionMajority,
    Draw,
    NoContest,
    Disqualification,
}

/// Which method counter a win feeds, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinMethod {
    Knockout,
    Submission,
    Decision,
    /// Counted as a win with no method counter.
    Disqualification,
}

/// Whether a result type decides a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Decisive(WinMethod),
    Draw,
    NoContest,
}

impl ResultType {
    pub const ALL: [ResultType; 9] = [
        ResultType::Knockout,
        ResultType::TechnicalKnockout,
        ResultType::Submission,
        ResultType::DecisionUnanimous,
        ResultType::DecisionSplit,
        ResultType::DecisionMajority,
        ResultType::Draw,
        ResultType::NoContest,
        ResultType::Disqualification,
    ];

    pub fn kind(&self) -> ResultKind {
        match self {
            ResultType::Knockout | ResultType::TechnicalKnockout => {
                ResultKind::Decisive(WinMethod::Knockout)
            }
            ResultType::Submission => ResultKind::Decisive(WinMethod::Submission),
            ResultType::DecisionUnanimous
            | ResultType::DecisionSplit
            | ResultType::DecisionMajority => ResultKind::Decisive(WinMethod::Decision),
            ResultType::Disqualification => ResultKind::Decisive(WinMethod::Disqualification),
            ResultType::Draw => ResultKind::Draw,
            ResultType::NoContest => ResultKind::NoContest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::Knockout => "KNOCKOUT",
            ResultType::TechnicalKnockout => "TECHNICAL_KNOCKOUT",
            ResultType::Submission => "SUBMISSION",
            ResultType::DecisionUnanimous => "DECISION_UNANIMOUS",
            ResultType::DecisionSplit => "DECISION_SPLIT",
            ResultType::DecisionMajority => "DECISION_MAJORITY",
            ResultType::Draw => "DRAW",
            ResultType::NoContest => "NO_CONTEST",
            ResultType::Disqualification => "DISQUALIFICATION",
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown result type: {0}")]
pub struct UnknownResultType(pub String);

impl FromStr for ResultType {
    type Err = UnknownResultType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResultType::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownResultType(s.to_string()))
    }
}

/// Optional details of how the fight finished.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishDetails {
    pub actual_rounds: Option<u8>,
    pub finish_round: Option<u8>,
    /// Clock time within the finish round, `m:ss`.
    pub finish_time: Option<String>,
}

/// A recorded fight result, the input to result application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FightOutcome {
    pub fight_id: FightId,
    pub weight_class_id: WeightClassId,
    pub fighter1_id: FighterId,
    pub fighter2_id: FighterId,
    pub result_type: ResultType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<FighterId>,
    #[serde(default)]
    pub finish: FinishDetails,
}

impl FightOutcome {
    /// The participant that is not `fighter`.
    pub fn opponent_of(&self, fighter: &FighterId) -> &FighterId {
        if fighter == &self.fighter1_id {
            &self.fighter2_id
        } else {
            &self.fighter1_id
        }
    }
}
