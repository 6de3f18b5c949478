//! Orchestration of result application against storage.

pub mod apply;
pub mod recorder;

pub use apply::{ApplyError, ResultApplier, UpdatedFightRecord};
pub use recorder::ResultRecorder;
