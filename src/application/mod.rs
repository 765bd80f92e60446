//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers apply a class room transition and persist it; query
//! handlers materialise views as of the injected clock.

pub mod handlers;

pub use handlers::{
    // Class room handlers
    ChangePhaseCommand, ChangePhaseHandler, ClassRoomView, GetClassRoomHandler,
    GetClassRoomQuery, JoinClassRoomCommand, JoinClassRoomHandler, KickOffCommand,
    KickOffHandler, LeaveClassRoomCommand, LeaveClassRoomHandler,
    // Course handlers
    CourseView, GetCourseHandler, GetCourseQuery, ListCoursesHandler,
};
