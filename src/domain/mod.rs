//! Domain types for fight results, statistics and ranking snapshots.
//!
//! This module provides:
//! - Identifiers and the TimeMs timestamp primitive
//! - Decimal ranking points
//! - The closed `ResultType` union and the `FightOutcome` input
//! - Fight, fighter stats and ranking entry records

pub mod fight;
pub mod points;
pub mod primitives;
pub mod ranking;
pub mod result;
pub mod stats;

pub use fight::{Fight, Fighter, WeightClass};
pub use points::Points;
pub use primitives::{FightId, FighterId, TimeMs, WeightClassId};
pub use ranking::{is_contiguous_ladder, RankingEntry, RankingSnapshot};
pub use result::{FightOutcome, FinishDetails, ResultKind, ResultType, UnknownResultType, WinMethod};
pub use stats::FighterStats;
