use crate::db::Repository;
use crate::domain::{FightOutcome, TimeMs, WeightClassId};
use crate::orchestration::apply::{ApplyError, ResultApplier, UpdatedFightRecord};
use crate::store::SqliteResultStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;
use tracing::warn;

/// Records fight results against the database.
///
/// Each submission runs in its own transaction. Submissions for the same
/// division queue behind a per-division lock so that every ranking
/// recomputation reads the snapshot written by the previous one. The
/// transaction itself then waits on the repository's writer gate, so
/// submissions for other divisions queue there instead of failing on a
/// locked database.
#[derive(Clone)]
pub struct ResultRecorder {
    repo: Arc<Repository>,
    applier: ResultApplier,
    locks: Arc<DivisionLocks>,
}

impl ResultRecorder {
    pub fn new(repo: Arc<Repository>, applier: ResultApplier) -> Self {
        Self {
            repo,
            applier,
            locks: Arc::new(DivisionLocks::default()),
        }
    }

    /// Validate and apply `outcome`, committing stats and rankings together.
    ///
    /// On any error the transaction is rolled back and nothing changes.
    pub async fn record(&self, outcome: &FightOutcome) -> Result<UpdatedFightRecord, ApplyError> {
        let lock = self.locks.lock_for(&outcome.weight_class_id);
        let _guard = lock.lock().await;

        let mut store = SqliteResultStore::begin(&self.repo).await?;
        match self
            .applier
            .apply(&mut store, outcome, TimeMs::now())
            .await
        {
            Ok(updated) => {
                store.commit().await?;
                Ok(updated)
            }
            Err(e) => {
                warn!(
                    fight_id = %outcome.fight_id,
                    error = %e,
                    "Fight result rejected, rolling back"
                );
                store.rollback().await?;
                Err(e)
            }
        }
    }
}

/// One async mutex per division, created on first use.
#[derive(Debug, Default)]
struct DivisionLocks {
    inner: Mutex<HashMap<WeightClassId, Arc<AsyncMutex<()>>>>,
}

impl DivisionLocks {
    fn lock_for(&self, weight_class: &WeightClassId) -> Arc<AsyncMutex<()>> {
        let mut map = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.entry(weight_class.clone()).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_division_shares_lock() {
        let locks = DivisionLocks::default();
        let a = locks.lock_for(&WeightClassId::new("lw"));
        let b = locks.lock_for(&WeightClassId::new("lw"));
        let c = locks.lock_for(&WeightClassId::new("hw"));
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
