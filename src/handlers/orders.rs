//! Order handlers

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use super::ApiJson;
use crate::models::{Order, ValidateOrderRequest};
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::logging::log_order_action;

/// GET /orders
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Value>> {
    Ok(Json(state.gateway.fetch_orders().await?))
}

/// POST /order-validate
pub async fn validate_order(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ValidateOrderRequest>,
) -> Result<Json<Order>> {
    match state.database.validate_order(&request.order_id).await {
        Ok(order) => {
            log_order_action(&order.fs_id, "validate", true);
            Ok(Json(order))
        }
        Err(e) => {
            log_order_action(&request.order_id, "validate", false);
            Err(e)
        }
    }
}
