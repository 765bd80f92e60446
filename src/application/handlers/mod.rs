//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod class_room;
pub mod course;

#[cfg(test)]
pub(crate) mod test_support;

pub use class_room::{
    ChangePhaseCommand, ChangePhaseHandler, ClassRoomView, GetClassRoomHandler,
    GetClassRoomQuery, JoinClassRoomCommand, JoinClassRoomHandler, KickOffCommand,
    KickOffHandler, LeaveClassRoomCommand, LeaveClassRoomHandler,
};
pub use course::{CourseView, GetCourseHandler, GetCourseQuery, ListCoursesHandler};
