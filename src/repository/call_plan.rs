use chrono::{NaiveDate, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::CallPlan;

pub async fn create(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
    user_id: Uuid,
    frequency_days: i32,
    next_call_date: NaiveDate,
    notes: Option<&str>,
) -> Result<CallPlan, ApiError> {
    let call_plan = sqlx::query_as::<_, CallPlan>(
        r#"INSERT INTO call_plan (call_plan_id, restaurant_id, user_id, frequency_days, next_call_date, notes, created_at, updated_at)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
           RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(restaurant_id)
    .bind(user_id)
    .bind(frequency_days)
    .bind(next_call_date)
    .bind(notes)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(call_plan)
}

/// Plans whose next call is due on or before `due_date`
pub async fn get_due_calls(
    conn: &mut PgConnection,
    due_date: NaiveDate,
) -> Result<Vec<CallPlan>, ApiError> {
    let call_plans = sqlx::query_as::<_, CallPlan>(
        "SELECT * FROM call_plan WHERE next_call_date <= $1 ORDER BY next_call_date",
    )
    .bind(due_date)
    .fetch_all(conn)
    .await?;

    Ok(call_plans)
}

/// Record a completed call: stamp it and advance the next call by the
/// plan's frequency
pub async fn update_after_call(
    conn: &mut PgConnection,
    call_plan_id: Uuid,
    call_date: NaiveDate,
) -> Result<Option<CallPlan>, ApiError> {
    let call_plan = sqlx::query_as::<_, CallPlan>(
        r#"UPDATE call_plan
           SET last_call_date = $2,
               next_call_date = $2 + frequency_days,
               updated_at = $3
           WHERE call_plan_id = $1
           RETURNING *"#,
    )
    .bind(call_plan_id)
    .bind(call_date)
    .bind(Utc::now())
    .fetch_optional(conn)
    .await?;

    Ok(call_plan)
}
