use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Recurring call schedule for a restaurant account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CallPlan {
    pub call_plan_id: Uuid,
    pub restaurant_id: Uuid,
    pub user_id: Uuid,
    /// Number of days between calls
    pub frequency_days: i32,
    pub last_call_date: Option<NaiveDate>,
    pub next_call_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
