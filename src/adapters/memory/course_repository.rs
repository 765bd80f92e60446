//! In-memory implementation of CourseRepository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::course::Course;
use crate::domain::foundation::{CourseId, DomainError};
use crate::ports::CourseRepository;

#[derive(Debug, Default, Clone)]
pub struct InMemoryCourseRepository {
    courses: Arc<RwLock<HashMap<CourseId, Course>>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn save(&self, course: &Course) -> Result<(), DomainError> {
        self.courses.write().await.insert(course.id(), course.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        Ok(self.courses.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Course>, DomainError> {
        let mut courses: Vec<Course> = self.courses.read().await.values().cloned().collect();
        courses.sort_by(|a, b| a.title().cmp(b.title()).then_with(|| a.id().cmp(&b.id())));
        Ok(courses)
    }
}
