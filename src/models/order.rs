//! Order model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DUPLICATE_ORDER: &str = "This order has already been validated.";

/// Owner recorded on validated orders.
// TODO: bind the authenticated subject once product decides whether order
// validation requires a signed-in user; the endpoint is public today.
pub const PLACEHOLDER_ORDER_OWNER: &str = "userId";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub fs_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOrderRequest {
    pub order_id: String,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub fs_id: String,
    pub user_id: String,
}

impl NewOrder {
    pub fn into_order(self, id: Uuid) -> Order {
        Order {
            id,
            fs_id: self.fs_id,
            user_id: self.user_id,
        }
    }
}
