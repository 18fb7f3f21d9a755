//! Event repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{conflict_on_unique, EventStore};
use crate::models::event::{Event, EventRequest, EventSummary, UpcomingEvent, DUPLICATE_EVENT};
use crate::utils::errors::Result;

const EVENT_COLUMNS: &str =
    "id, title, location, start_datetime, end_datetime, description, view_public";

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn list(&self, visible_only: bool) -> Result<Vec<Event>> {
        let sql = if visible_only {
            format!("SELECT {EVENT_COLUMNS} FROM events WHERE view_public = true ORDER BY seq")
        } else {
            format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY seq")
        };

        let events = sqlx::query_as::<_, Event>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    async fn list_summaries(&self) -> Result<Vec<EventSummary>> {
        let events = sqlx::query_as::<_, EventSummary>(
            "SELECT id, title, start_datetime, end_datetime, view_public FROM events ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn find_by_identity(
        &self,
        title: &str,
        location: &str,
        start_datetime: DateTime<Utc>,
    ) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE title = $1 AND location = $2 AND start_datetime = $3"
        ))
        .bind(title)
        .bind(location)
        .bind(start_datetime)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn create(&self, request: &EventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (id, title, location, start_datetime, end_datetime, description, view_public)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&request.title)
        .bind(&request.location)
        .bind(request.start_datetime)
        .bind(request.end_datetime)
        .bind(&request.description)
        .bind(request.view_public)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_on_unique(DUPLICATE_EVENT))?;

        Ok(event)
    }

    async fn replace(&self, id: Uuid, request: &EventRequest) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET title = $2,
                location = $3,
                start_datetime = $4,
                end_datetime = $5,
                description = $6,
                view_public = $7,
                updated_at = $8
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&request.title)
        .bind(&request.location)
        .bind(request.start_datetime)
        .bind(request.end_datetime)
        .bind(&request.description)
        .bind(request.view_public)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(conflict_on_unique(DUPLICATE_EVENT))?;

        Ok(event)
    }

    async fn delete_with_rsvps(&self, id: Uuid) -> Result<Option<u64>> {
        let mut tx = self.pool.begin().await?;

        let removed_rsvps = sqlx::query("DELETE FROM rsvps WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let removed_events = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed_events == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(removed_rsvps))
    }

    async fn list_upcoming(&self, ids: &[Uuid], now: DateTime<Utc>) -> Result<Vec<UpcomingEvent>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let events = sqlx::query_as::<_, UpcomingEvent>(
            r#"
            SELECT id, title, start_datetime, end_datetime
            FROM events
            WHERE id = ANY($1) AND start_datetime >= $2
            ORDER BY seq
            "#,
        )
        .bind(ids)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
