//! Class room repository port.
//!
//! Persists class room snapshots and their append-only event logs.
//!
//! # Concurrency
//!
//! Writes are serialized per class room. [`ClassRoomRepository::append`]
//! only succeeds when the stored log still has `transition.base_version`
//! events; otherwise it fails with `ConcurrentModification` and writes
//! nothing.

use crate::domain::class_room::{ClassRoom, Transition};
use crate::domain::foundation::{ClassRoomId, CourseId, DomainError};
use async_trait::async_trait;

/// Repository port for ClassRoom aggregate persistence.
#[async_trait]
pub trait ClassRoomRepository: Send + Sync {
    /// Persist a freshly kicked-off class room and its initial events.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, transition: &Transition) -> Result<(), DomainError>;

    /// Find a class room with its attendance and full event log.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ClassRoomId) -> Result<Option<ClassRoom>, DomainError>;

    /// Append the events of a transition and store the new attendance.
    ///
    /// # Errors
    ///
    /// - `ClassRoomNotFound` if the class room doesn't exist
    /// - `ConcurrentModification` if the log moved past `base_version`
    /// - `DatabaseError` on persistence failure
    async fn append(&self, transition: &Transition) -> Result<(), DomainError>;

    /// IDs of the class rooms run for a course, oldest first.
    async fn list_ids_by_course(&self, course_id: &CourseId)
        -> Result<Vec<ClassRoomId>, DomainError>;
}
