use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::OperationId;

/// Time source for operation timestamps. Injected rather than read from
/// ambient globals so the service stays deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time. Production default.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Identifier source for new operations (and new accounts).
pub trait OperationIds: Send + Sync {
    fn next(&self) -> OperationId;
}

/// Random v4 UUIDs. Production default.
pub struct RandomIds;

impl OperationIds for RandomIds {
    fn next(&self) -> OperationId {
        Uuid::new_v4()
    }
}

/// Deterministic ids derived from an incrementing counter.
pub struct SequenceIds {
    next: AtomicU64,
}

impl SequenceIds {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl OperationIds for SequenceIds {
    fn next(&self) -> OperationId {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        Uuid::from_u128(n as u128)
    }
}
