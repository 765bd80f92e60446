//! Clock port.
//!
//! Elapsed time is computed on demand from this port; nothing ticks in the
//! background.

use crate::domain::foundation::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
