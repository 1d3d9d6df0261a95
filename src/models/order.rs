use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum OrderStatus {
    New,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Canceled,
}

/// An order placed by a restaurant. Every order is linked to the
/// interaction that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub order_id: Uuid,
    pub restaurant_id: Uuid,
    pub user_id: Uuid,
    pub interaction_id: Uuid,
    pub status: OrderStatus,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
