//! Course repository port.
//!
//! Courses are written administratively (migrations, seeding, tests) and
//! read by every class room operation.

use crate::domain::course::Course;
use crate::domain::foundation::{CourseId, DomainError};
use async_trait::async_trait;

/// Repository port for the course catalogue.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert or replace a course together with its phases.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, course: &Course) -> Result<(), DomainError>;

    /// Find a course by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError>;

    /// All courses ordered by title.
    async fn list(&self) -> Result<Vec<Course>, DomainError>;
}
