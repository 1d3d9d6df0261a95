use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Aggregated order metrics for one restaurant over one period
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PerformanceMetric {
    pub metric_id: Uuid,
    pub restaurant_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_orders: i32,
    pub total_amount: f64,
    pub average_order_value: f64,
    /// Average days between orders in the period
    pub order_frequency: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
