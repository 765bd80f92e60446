//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CourseRepository` - catalogue persistence
//! - `ClassRoomRepository` - class room snapshots and their append-only logs
//! - `SessionValidator` - bearer token validation
//! - `Clock` - source of the current time

mod class_room_repository;
mod clock;
mod course_repository;
mod session_validator;

pub use class_room_repository::ClassRoomRepository;
pub use clock::Clock;
pub use course_repository::CourseRepository;
pub use session_validator::SessionValidator;
