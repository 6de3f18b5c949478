//! Fight, fighter and weight class records.

use crate::domain::{FightId, FighterId, FinishDetails, ResultType, TimeMs, WeightClassId};
use serde::{Deserialize, Serialize};

/// A weight class (division).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightClass {
    pub id: WeightClassId,
    pub name: String,
    /// Upper weight limit in pounds.
    pub limit_lbs: u16,
}

/// A fighter as far as result application cares about one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fighter {
    pub id: FighterId,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

/// A fight record, scheduled or decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fight {
    pub id: FightId,
    pub weight_class_id: WeightClassId,
    pub fighter1_id: FighterId,
    pub fighter2_id: FighterId,
    pub scheduled_rounds: u8,
    pub is_title_fight: bool,
    pub result_type: Option<ResultType>,
    pub winner_id: Option<FighterId>,
    #[serde(flatten)]
    pub finish: FinishDetails,
    pub decided_at: Option<TimeMs>,
}

impl Fight {
    /// A fight with no result recorded yet.
    pub fn scheduled(
        weight_class_id: WeightClassId,
        fighter1_id: FighterId,
        fighter2_id: FighterId,
        scheduled_rounds: u8,
    ) -> Self {
        Fight {
            id: FightId::generate(),
            weight_class_id,
            fighter1_id,
            fighter2_id,
            scheduled_rounds,
            is_title_fight: false,
            result_type: None,
            winner_id: None,
            finish: FinishDetails::default(),
            decided_at: None,
        }
    }

    pub fn is_participant(&self, fighter: &FighterId) -> bool {
        fighter == &self.fighter1_id || fighter == &self.fighter2_id
    }

    pub fn is_decided(&self) -> bool {
        self.result_type.is_some()
    }
}
