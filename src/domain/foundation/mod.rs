//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, authentication and error types
//! that form the vocabulary of the class room domain.

mod auth;
mod command;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ClassRoomEventId, ClassRoomId, CourseId, PhaseId, UserId};
pub use timestamp::Timestamp;
