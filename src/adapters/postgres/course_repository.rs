//! PostgreSQL implementation of CourseRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::domain::course::{Course, Phase};
use crate::domain::foundation::{CourseId, DomainError, PhaseId};
use crate::ports::CourseRepository;

#[derive(Clone)]
pub struct PostgresCourseRepository {
    pool: PgPool,
}

impl PostgresCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn phases_of(&self, course_id: Uuid) -> Result<Vec<Phase>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.title, p.timer
            FROM course_phases cp
            JOIN phases p ON p.id = cp.phase_id
            WHERE cp.course_id = $1
            ORDER BY cp.position
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch course phases", e))?;

        rows.iter().map(row_to_phase).collect()
    }

    async fn assemble(&self, row: PgRow) -> Result<Course, DomainError> {
        let id: Uuid = get(&row, "id")?;
        let title: String = get(&row, "title")?;
        let default_phase: Option<Uuid> = get(&row, "default_phase_id")?;
        let phases = self.phases_of(id).await?;

        Ok(Course::new(
            CourseId::from_uuid(id),
            title,
            phases,
            default_phase.map(PhaseId::from_uuid),
        )?)
    }
}

#[async_trait]
impl CourseRepository for PostgresCourseRepository {
    async fn save(&self, course: &Course) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        for phase in course.phases() {
            upsert_phase(&mut tx, phase).await?;
        }

        sqlx::query(
            r#"
            INSERT INTO courses (id, title, default_phase_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                default_phase_id = EXCLUDED.default_phase_id
            "#,
        )
        .bind(course.id().as_uuid())
        .bind(course.title())
        .bind(course.default_phase_id().map(|p| *p.as_uuid()))
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to upsert course", e))?;

        sqlx::query("DELETE FROM course_phases WHERE course_id = $1")
            .bind(course.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to clear course phases", e))?;

        for (position, phase) in course.phases().iter().enumerate() {
            sqlx::query(
                "INSERT INTO course_phases (course_id, phase_id, position) VALUES ($1, $2, $3)",
            )
            .bind(course.id().as_uuid())
            .bind(phase.id().as_uuid())
            .bind(position as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to link course phase", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit course", e))
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let row = sqlx::query("SELECT id, title, default_phase_id FROM courses WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch course", e))?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Course>, DomainError> {
        let rows = sqlx::query("SELECT id, title, default_phase_id FROM courses ORDER BY title, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list courses", e))?;

        let mut courses = Vec::with_capacity(rows.len());
        for row in rows {
            courses.push(self.assemble(row).await?);
        }
        Ok(courses)
    }
}

async fn upsert_phase(tx: &mut Transaction<'_, Postgres>, phase: &Phase) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO phases (id, title, timer)
        VALUES ($1, $2, $3)
        ON CONFLICT (id) DO UPDATE SET title = EXCLUDED.title, timer = EXCLUDED.timer
        "#,
    )
    .bind(phase.id().as_uuid())
    .bind(phase.title())
    .bind(phase.timer())
    .execute(&mut **tx)
    .await
    .map_err(|e| DomainError::database("Failed to upsert phase", e))?;
    Ok(())
}

pub(super) fn row_to_phase(row: &PgRow) -> Result<Phase, DomainError> {
    let id: Uuid = get(row, "id")?;
    let title: String = get(row, "title")?;
    let timer: bool = get(row, "timer")?;
    Ok(Phase::new(PhaseId::from_uuid(id), title, timer)?)
}

pub(super) fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::database(&format!("Failed to read column '{}'", column), e))
}
