//! Class room domain module.
//!
//! Tracks attendance and the append-only event log of a running course,
//! including the accumulated timer that advances only in timed phases.

mod aggregate;
mod errors;
mod event;
mod proptests;

pub use aggregate::{ClassRoom, Transition};
pub use errors::ClassRoomError;
pub use event::{ClassRoomEvent, EventAction, EventLog};
