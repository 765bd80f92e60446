//! Composition root.
//!
//! Wires ports into application handlers and the HTTP router. Both `main`
//! and the integration tests build the service through [`build_router`].

use std::sync::Arc;

use axum::Router;

use crate::adapters::http::middleware::AuthState;
use crate::adapters::http::{self, ClassRoomHandlers, CourseHandlers, HttpSettings};
use crate::application::{
    ChangePhaseHandler, GetClassRoomHandler, GetCourseHandler, JoinClassRoomHandler,
    KickOffHandler, LeaveClassRoomHandler, ListCoursesHandler,
};
use crate::domain::course::{Course, Phase};
use crate::domain::foundation::{CourseId, DomainError, PhaseId};
use crate::ports::{ClassRoomRepository, Clock, CourseRepository};

/// Port implementations the service runs against.
#[derive(Clone)]
pub struct AppPorts {
    pub courses: Arc<dyn CourseRepository>,
    pub class_rooms: Arc<dyn ClassRoomRepository>,
    pub clock: Arc<dyn Clock>,
}

impl AppPorts {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        class_rooms: Arc<dyn ClassRoomRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            courses,
            class_rooms,
            clock,
        }
    }

    fn class_room_handlers(&self) -> ClassRoomHandlers {
        let (courses, class_rooms, clock) = (&self.courses, &self.class_rooms, &self.clock);
        ClassRoomHandlers::new(
            Arc::new(KickOffHandler::new(
                courses.clone(),
                class_rooms.clone(),
                clock.clone(),
            )),
            Arc::new(JoinClassRoomHandler::new(
                courses.clone(),
                class_rooms.clone(),
                clock.clone(),
            )),
            Arc::new(LeaveClassRoomHandler::new(
                courses.clone(),
                class_rooms.clone(),
                clock.clone(),
            )),
            Arc::new(ChangePhaseHandler::new(
                courses.clone(),
                class_rooms.clone(),
                clock.clone(),
            )),
            Arc::new(GetClassRoomHandler::new(
                courses.clone(),
                class_rooms.clone(),
                clock.clone(),
            )),
        )
    }

    fn course_handlers(&self) -> CourseHandlers {
        CourseHandlers::new(
            Arc::new(ListCoursesHandler::new(
                self.courses.clone(),
                self.class_rooms.clone(),
            )),
            Arc::new(GetCourseHandler::new(
                self.courses.clone(),
                self.class_rooms.clone(),
            )),
        )
    }
}

/// Builds the complete HTTP service over the given ports.
pub fn build_router(ports: &AppPorts, auth: AuthState, settings: &HttpSettings) -> Router {
    http::router(
        ports.course_handlers(),
        ports.class_room_handlers(),
        auth,
        settings,
    )
}

/// The "Math" course: an untimed Lobby (default) and a timed Calculate phase.
pub fn demo_course() -> Result<Course, DomainError> {
    let lobby = Phase::new(PhaseId::new(), "Lobby", false)?;
    let calculate = Phase::new(PhaseId::new(), "Calculate", true)?;
    let default_phase = lobby.id();
    Ok(Course::new(
        CourseId::new(),
        "Math",
        vec![lobby, calculate],
        Some(default_phase),
    )?)
}

/// Saves the demo course unless a course titled "Math" already exists.
pub async fn seed_demo_course(courses: &dyn CourseRepository) -> Result<(), DomainError> {
    if courses.list().await?.iter().any(|c| c.title() == "Math") {
        tracing::debug!("Demo course already present");
        return Ok(());
    }

    let course = demo_course()?;
    courses.save(&course).await?;
    tracing::info!(course_id = %course.id(), "Seeded demo course");
    Ok(())
}
