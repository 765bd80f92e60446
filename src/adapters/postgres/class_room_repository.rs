//! PostgreSQL implementation of ClassRoomRepository.
//!
//! Appends run in one transaction that locks the class room row with
//! `SELECT ... FOR UPDATE` before comparing the stored event count against
//! the transition's base version.
//!
//! Snapshots are read inside a single `REPEATABLE READ` transaction so the
//! attendance rows and the event log always come from the same commit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::course_repository::{get, row_to_phase};
use crate::domain::class_room::{ClassRoom, ClassRoomEvent, EventAction, EventLog, Transition};
use crate::domain::foundation::{
    ClassRoomEventId, ClassRoomId, CourseId, DomainError, ErrorCode, Timestamp, UserId,
};
use crate::ports::ClassRoomRepository;

#[derive(Clone)]
pub struct PostgresClassRoomRepository {
    pool: PgPool,
}

impl PostgresClassRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))
    }
}

#[async_trait]
impl ClassRoomRepository for PostgresClassRoomRepository {
    async fn create(&self, transition: &Transition) -> Result<(), DomainError> {
        let class_room = &transition.class_room;
        let mut tx = self.begin().await?;

        sqlx::query("INSERT INTO class_rooms (id, course_id, created_at) VALUES ($1, $2, $3)")
            .bind(class_room.id().as_uuid())
            .bind(class_room.course_id().as_uuid())
            .bind(class_room.created_at().as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to insert class room", e))?;

        insert_events(&mut tx, &transition.appended).await?;
        replace_attending(&mut tx, class_room).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit class room", e))
    }

    async fn find_by_id(&self, id: &ClassRoomId) -> Result<Option<ClassRoom>, DomainError> {
        let mut tx = self.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to set snapshot isolation", e))?;

        let row = sqlx::query("SELECT id, course_id, created_at FROM class_rooms WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to fetch class room", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let uuid = *id.as_uuid();
        let course_id: Uuid = get(&row, "course_id")?;
        let created_at: DateTime<Utc> = get(&row, "created_at")?;
        // Events before attendance: a torn read then surfaces as a stale base version.
        let events = load_events(&mut *tx, uuid).await?;
        let attending = load_attending(&mut *tx, uuid).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to close snapshot", e))?;

        Ok(Some(ClassRoom::reconstitute(
            *id,
            CourseId::from_uuid(course_id),
            attending,
            events,
            Timestamp::from_datetime(created_at),
        )))
    }

    async fn append(&self, transition: &Transition) -> Result<(), DomainError> {
        let class_room = &transition.class_room;
        let mut tx = self.begin().await?;

        let locked = sqlx::query("SELECT id FROM class_rooms WHERE id = $1 FOR UPDATE")
            .bind(class_room.id().as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to lock class room", e))?;
        if locked.is_none() {
            return Err(DomainError::class_room_not_found(class_room.id()));
        }

        let (stored,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM class_room_events WHERE class_room_id = $1")
                .bind(class_room.id().as_uuid())
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to count class room events", e))?;

        if stored as u64 != transition.base_version {
            tracing::warn!(
                class_room_id = %class_room.id(),
                stored,
                base = transition.base_version,
                "Rejected stale class room append"
            );
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "Class room {} has {} events, expected {}",
                    class_room.id(),
                    stored,
                    transition.base_version
                ),
            ));
        }

        insert_events(&mut tx, &transition.appended).await?;
        replace_attending(&mut tx, class_room).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit class room events", e))
    }

    async fn list_ids_by_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<ClassRoomId>, DomainError> {
        let ids: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM class_rooms WHERE course_id = $1 ORDER BY created_at, id",
        )
        .bind(course_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list class rooms", e))?;

        Ok(ids.into_iter().map(|(id,)| ClassRoomId::from_uuid(id)).collect())
    }
}

async fn insert_events(
    tx: &mut Transaction<'_, Postgres>,
    events: &[ClassRoomEvent],
) -> Result<(), DomainError> {
    for event in events {
        sqlx::query(
            r#"
            INSERT INTO class_room_events (
                id, class_room_id, action, to_phase_id, user_id, created_at, timer
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.id().as_uuid())
        .bind(event.class_room_id().as_uuid())
        .bind(event.action().as_str())
        .bind(event.to_phase().map(|p| *p.id().as_uuid()))
        .bind(event.user().map(|u| u.as_str()))
        .bind(event.created_at().as_datetime())
        .bind(event.timer())
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert class room event", e))?;
    }
    Ok(())
}

/// Rewrites the attendance rows so their positions follow join order.
async fn replace_attending(
    tx: &mut Transaction<'_, Postgres>,
    class_room: &ClassRoom,
) -> Result<(), DomainError> {
    sqlx::query("DELETE FROM class_room_attendees WHERE class_room_id = $1")
        .bind(class_room.id().as_uuid())
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to clear attendees", e))?;

    for user in class_room.attending() {
        sqlx::query("INSERT INTO class_room_attendees (class_room_id, user_id) VALUES ($1, $2)")
            .bind(class_room.id().as_uuid())
            .bind(user.as_str())
            .execute(&mut **tx)
            .await
            .map_err(|e| DomainError::database("Failed to insert attendee", e))?;
    }
    Ok(())
}

async fn load_attending(conn: &mut PgConnection, id: Uuid) -> Result<Vec<UserId>, DomainError> {
    let rows = sqlx::query(
        "SELECT user_id FROM class_room_attendees WHERE class_room_id = $1 ORDER BY position",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| DomainError::database("Failed to fetch attendees", e))?;

    rows.iter()
        .map(|row| -> Result<UserId, DomainError> {
            Ok(UserId::new(get::<String>(row, "user_id")?)?)
        })
        .collect()
}

async fn load_events(conn: &mut PgConnection, id: Uuid) -> Result<EventLog, DomainError> {
    let rows = sqlx::query(
        r#"
        SELECT e.id AS event_id, e.action, e.user_id, e.created_at,
               e.timer AS event_timer, p.id, p.title, p.timer
        FROM class_room_events e
        LEFT JOIN phases p ON p.id = e.to_phase_id
        WHERE e.class_room_id = $1
        ORDER BY e.seq
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| DomainError::database("Failed to fetch class room events", e))?;

    let mut events = Vec::with_capacity(rows.len());
    for row in &rows {
        let phase_id: Option<Uuid> = get(row, "id")?;
        let to_phase = match phase_id {
            Some(_) => Some(row_to_phase(row)?),
            None => None,
        };
        let action: String = get(row, "action")?;
        let user: Option<String> = get(row, "user_id")?;
        let created_at: DateTime<Utc> = get(row, "created_at")?;

        events.push(ClassRoomEvent::reconstitute(
            ClassRoomEventId::from_uuid(get(row, "event_id")?),
            ClassRoomId::from_uuid(id),
            action.parse::<EventAction>()?,
            to_phase,
            user.map(UserId::new).transpose()?,
            Timestamp::from_datetime(created_at),
            get(row, "event_timer")?,
        )?);
    }
    Ok(EventLog::from_events(events))
}
