//! Course catalogue module.
//!
//! Courses and phases are created administratively and never mutated by
//! class room operations. Validation happens once at construction.

mod course;
mod phase;

pub use course::Course;
pub use phase::{Phase, MAX_TITLE_LENGTH};
