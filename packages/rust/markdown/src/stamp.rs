//! Date and identifier sources for rendered documents.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDate};
use uuid::Uuid;

/// Supplies the date stamped into `created` / `modified`.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Supplies the per-document `uuid`.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> Uuid;
}

/// The local calendar date.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always the same date.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Random v4 identifiers.
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Identifiers `00000000-0000-0000-0000-000000000001`, `...0002`, and so on.
#[derive(Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        Uuid::from_u128(u128::from(n))
    }
}
