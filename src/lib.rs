pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;
pub mod store;

pub use config::Config;
pub use db::{init_db, Repository, SeedError};
pub use domain::{
    Fight, FightId, FightOutcome, Fighter, FighterId, FighterStats, Points, RankingEntry,
    RankingSnapshot, ResultType, TimeMs, WeightClass, WeightClassId,
};
pub use engine::{RankingEngine, RankingPolicy, ResultError};
pub use error::AppError;
pub use orchestration::{ApplyError, ResultApplier, ResultRecorder, UpdatedFightRecord};
pub use store::ResultStore;
