//! Domain layer - pure business logic with no infrastructure dependencies.
//!
//! - `foundation` - identifiers, timestamps, errors
//! - `course` - course catalogue and phases
//! - `class_room` - the class room aggregate and its event log

pub mod class_room;
pub mod course;
pub mod foundation;
