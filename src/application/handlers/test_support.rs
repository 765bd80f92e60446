//! Mock ports shared by handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::class_room::{ClassRoom, Transition};
use crate::domain::course::{Course, Phase};
use crate::domain::foundation::{
    ClassRoomId, CommandMetadata, CourseId, DomainError, ErrorCode, PhaseId, Timestamp, UserId,
};
use crate::ports::{ClassRoomRepository, Clock, CourseRepository};

pub struct MathCourse {
    pub course: Course,
    pub lobby: Phase,
    pub calculate: Phase,
}

pub fn math_course() -> MathCourse {
    let lobby = Phase::new(PhaseId::new(), "Lobby", false).unwrap();
    let calculate = Phase::new(PhaseId::new(), "Calculate", true).unwrap();
    let course = Course::new(
        CourseId::new(),
        "Math",
        vec![lobby.clone(), calculate.clone()],
        Some(lobby.id()),
    )
    .unwrap();
    MathCourse {
        course,
        lobby,
        calculate,
    }
}

pub fn metadata(user: &str) -> CommandMetadata {
    CommandMetadata::new(UserId::new(user).unwrap()).with_source("test")
}

pub fn at(secs: i64) -> Timestamp {
    Timestamp::from_unix_secs(1_700_000_000 + secs)
}

pub struct FixedClock(pub Mutex<Timestamp>);

impl FixedClock {
    pub fn at(secs: i64) -> Self {
        Self(Mutex::new(at(secs)))
    }

    pub fn set(&self, secs: i64) {
        *self.0.lock().unwrap() = at(secs);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.0.lock().unwrap()
    }
}

#[derive(Default)]
pub struct MockCourseRepository {
    courses: Mutex<Vec<Course>>,
}

impl MockCourseRepository {
    pub fn with(courses: Vec<Course>) -> Self {
        Self {
            courses: Mutex::new(courses),
        }
    }
}

#[async_trait]
impl CourseRepository for MockCourseRepository {
    async fn save(&self, course: &Course) -> Result<(), DomainError> {
        self.courses.lock().unwrap().push(course.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == *id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Course>, DomainError> {
        let mut courses = self.courses.lock().unwrap().clone();
        courses.sort_by(|a, b| a.title().cmp(b.title()));
        Ok(courses)
    }
}

/// Stores snapshots and counts appended events.
#[derive(Default)]
pub struct MockClassRoomRepository {
    rooms: Mutex<HashMap<ClassRoomId, ClassRoom>>,
    appended: Mutex<usize>,
    fail_writes: bool,
}

impl MockClassRoomRepository {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, class_room: ClassRoom) {
        self.rooms.lock().unwrap().insert(class_room.id(), class_room);
    }

    pub fn stored(&self, id: ClassRoomId) -> Option<ClassRoom> {
        self.rooms.lock().unwrap().get(&id).cloned()
    }

    pub fn appended_events(&self) -> usize {
        *self.appended.lock().unwrap()
    }
}

#[async_trait]
impl ClassRoomRepository for MockClassRoomRepository {
    async fn create(&self, transition: &Transition) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::new(ErrorCode::DatabaseError, "Simulated failure"));
        }
        self.insert(transition.class_room.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ClassRoomId) -> Result<Option<ClassRoom>, DomainError> {
        Ok(self.stored(*id))
    }

    async fn append(&self, transition: &Transition) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::new(ErrorCode::DatabaseError, "Simulated failure"));
        }
        let mut rooms = self.rooms.lock().unwrap();
        let current = rooms
            .get(&transition.class_room.id())
            .map(|r| r.version())
            .unwrap_or_default();
        if current != transition.base_version {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                "Stale class room version",
            ));
        }
        rooms.insert(transition.class_room.id(), transition.class_room.clone());
        *self.appended.lock().unwrap() += transition.appended.len();
        Ok(())
    }

    async fn list_ids_by_course(&self, course_id: &CourseId) -> Result<Vec<ClassRoomId>, DomainError> {
        let rooms = self.rooms.lock().unwrap();
        let mut matching: Vec<_> = rooms
            .values()
            .filter(|r| r.course_id() == *course_id)
            .map(|r| (*r.created_at(), r.id()))
            .collect();
        matching.sort();
        Ok(matching.into_iter().map(|(_, id)| id).collect())
    }
}
