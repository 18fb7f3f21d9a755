//! Order repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{conflict_on_unique, OrderStore};
use crate::models::order::{NewOrder, Order, DUPLICATE_ORDER};
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn find_by_fs_id(&self, fs_id: &str) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, fs_id, user_id FROM orders WHERE fs_id = $1",
        )
        .bind(fs_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn create(&self, order: NewOrder) -> Result<Order> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (id, fs_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, fs_id, user_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(order.fs_id)
        .bind(order.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_on_unique(DUPLICATE_ORDER))?;

        Ok(order)
    }
}
