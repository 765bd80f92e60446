//! In-memory implementation of ClassRoomRepository.
//!
//! The version check and the write happen under one write lock, so appends
//! to the same class room are serialized.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::class_room::{ClassRoom, Transition};
use crate::domain::foundation::{ClassRoomId, CourseId, DomainError, ErrorCode};
use crate::ports::ClassRoomRepository;

#[derive(Debug, Default, Clone)]
pub struct InMemoryClassRoomRepository {
    class_rooms: Arc<RwLock<HashMap<ClassRoomId, ClassRoom>>>,
}

impl InMemoryClassRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClassRoomRepository for InMemoryClassRoomRepository {
    async fn create(&self, transition: &Transition) -> Result<(), DomainError> {
        let mut class_rooms = self.class_rooms.write().await;
        let id = transition.class_room.id();
        if class_rooms.contains_key(&id) {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!("Class room already exists: {}", id),
            ));
        }
        class_rooms.insert(id, transition.class_room.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ClassRoomId) -> Result<Option<ClassRoom>, DomainError> {
        Ok(self.class_rooms.read().await.get(id).cloned())
    }

    async fn append(&self, transition: &Transition) -> Result<(), DomainError> {
        let mut class_rooms = self.class_rooms.write().await;
        let id = transition.class_room.id();

        let stored = class_rooms
            .get(&id)
            .ok_or_else(|| DomainError::class_room_not_found(id))?;

        if stored.version() != transition.base_version {
            tracing::warn!(
                class_room_id = %id,
                stored = stored.version(),
                base = transition.base_version,
                "Rejected stale class room append"
            );
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "Class room {} has {} events, expected {}",
                    id,
                    stored.version(),
                    transition.base_version
                ),
            ));
        }

        class_rooms.insert(id, transition.class_room.clone());
        Ok(())
    }

    async fn list_ids_by_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<ClassRoomId>, DomainError> {
        let class_rooms = self.class_rooms.read().await;
        let mut matching: Vec<_> = class_rooms
            .values()
            .filter(|c| c.course_id() == *course_id)
            .map(|c| (*c.created_at(), c.id()))
            .collect();
        matching.sort();
        Ok(matching.into_iter().map(|(_, id)| id).collect())
    }
}
