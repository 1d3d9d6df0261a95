use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum InteractionType {
    Email,
    Call,
    Meeting,
    Order,
    Other,
}

/// A touchpoint between a sales user and a restaurant
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interaction {
    pub interaction_id: Uuid,
    pub user_id: Uuid,
    pub restaurant_id: Uuid,
    pub interaction_type: InteractionType,
    pub interaction_date: DateTime<Utc>,
    pub notes: Option<String>,
}
