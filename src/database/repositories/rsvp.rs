//! RSVP repository implementation

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::{conflict_on_unique, RsvpStore};
use crate::models::rsvp::{CreateRsvpRequest, Rsvp, UpdateRsvpRequest, DUPLICATE_RSVP};
use crate::utils::errors::Result;

const RSVP_COLUMNS: &str = "id, user_id, name, event_id, attending, guests, comments";

#[derive(Clone)]
pub struct RsvpRepository {
    pool: PgPool,
}

impl RsvpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RsvpStore for RsvpRepository {
    async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Rsvp>> {
        let rsvps = sqlx::query_as::<_, Rsvp>(&format!(
            "SELECT {RSVP_COLUMNS} FROM rsvps WHERE event_id = $1 ORDER BY seq"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rsvps)
    }

    async fn list_event_ids_for_user(&self, user_id: &str) -> Result<Vec<Uuid>> {
        let rows: Vec<(Uuid,)> =
            sqlx::query_as("SELECT event_id FROM rsvps WHERE user_id = $1 ORDER BY seq")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(event_id,)| event_id).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rsvp>> {
        let rsvp = sqlx::query_as::<_, Rsvp>(&format!(
            "SELECT {RSVP_COLUMNS} FROM rsvps WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rsvp)
    }

    async fn find_by_event_and_user(&self, event_id: Uuid, user_id: &str) -> Result<Option<Rsvp>> {
        let rsvp = sqlx::query_as::<_, Rsvp>(&format!(
            "SELECT {RSVP_COLUMNS} FROM rsvps WHERE event_id = $1 AND user_id = $2"
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rsvp)
    }

    async fn create(&self, request: &CreateRsvpRequest) -> Result<Rsvp> {
        let rsvp = sqlx::query_as::<_, Rsvp>(&format!(
            r#"
            INSERT INTO rsvps (id, user_id, name, event_id, attending, guests, comments)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {RSVP_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&request.user_id)
        .bind(&request.name)
        .bind(request.event_id)
        .bind(request.attending)
        .bind(request.guests)
        .bind(&request.comments)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_on_unique(DUPLICATE_RSVP))?;

        Ok(rsvp)
    }

    async fn update(&self, id: Uuid, request: &UpdateRsvpRequest) -> Result<Option<Rsvp>> {
        let rsvp = sqlx::query_as::<_, Rsvp>(&format!(
            r#"
            UPDATE rsvps
            SET name = $2,
                attending = $3,
                guests = $4,
                comments = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING {RSVP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&request.name)
        .bind(request.attending)
        .bind(request.guests)
        .bind(&request.comments)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(rsvp)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM rsvps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
