//! Domain primitives: TimeMs and the entity identifiers.

use serde::{Deserialize, Serialize};

/// Time in milliseconds since Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeMs(pub i64);

impl TimeMs {
    /// Create a TimeMs from milliseconds.
    pub fn new(ms: i64) -> Self {
        TimeMs(ms)
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        TimeMs(chrono::Utc::now().timestamp_millis())
    }

    /// Get the underlying milliseconds value.
    pub fn as_ms(&self) -> i64 {
        self.0
    }

    /// The next representable instant after `self`.
    pub fn succ(&self) -> Self {
        TimeMs(self.0.saturating_add(1))
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            /// Fresh random (UUID v4) identifier.
            pub fn generate() -> Self {
                $name(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a fighter.
    FighterId
);
string_id!(
    /// Identifier of a scheduled or completed fight.
    FightId
);
string_id!(
    /// Identifier of a weight class (division).
    WeightClassId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timems_ordering() {
        let t1 = TimeMs::new(1000);
        let t2 = TimeMs::new(2000);
        assert!(t1 < t2);
        assert_eq!(t1.succ(), TimeMs::new(1001));
    }

    #[test]
    fn test_succ_saturates() {
        assert_eq!(TimeMs::new(i64::MAX).succ(), TimeMs::new(i64::MAX));
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = FighterId::generate();
        let b = FighterId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = WeightClassId::new("lightweight");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"lightweight\"");
        assert_eq!(id.to_string(), "lightweight");
    }
}
