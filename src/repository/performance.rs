use chrono::{NaiveDate, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Order, PerformanceMetric};

/// Aggregate the restaurant's orders over the period and persist the
/// resulting metric row
pub async fn calculate_metrics(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<PerformanceMetric, ApiError> {
    let orders = sqlx::query_as::<_, Order>(
        r#"SELECT * FROM "order"
           WHERE restaurant_id = $1
             AND created_at::date >= $2
             AND created_at::date <= $3"#,
    )
    .bind(restaurant_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(&mut *conn)
    .await?;

    let total_orders = orders.len() as i32;
    let total_amount: f64 = orders.iter().map(|order| order.amount as f64).sum();
    let average_order_value = if total_orders > 0 {
        total_amount / total_orders as f64
    } else {
        0.0
    };

    // Average days between orders across the period
    let order_frequency = if total_orders > 1 {
        (end_date - start_date).num_days() as f64 / total_orders as f64
    } else {
        0.0
    };

    let metric = sqlx::query_as::<_, PerformanceMetric>(
        r#"INSERT INTO performance_metric
               (metric_id, restaurant_id, period_start, period_end, total_orders, total_amount,
                average_order_value, order_frequency, created_at, updated_at)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
           RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(restaurant_id)
    .bind(start_date)
    .bind(end_date)
    .bind(total_orders)
    .bind(total_amount)
    .bind(average_order_value)
    .bind(order_frequency)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(metric)
}

pub async fn get_restaurant_metrics(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
) -> Result<Vec<PerformanceMetric>, ApiError> {
    let metrics = sqlx::query_as::<_, PerformanceMetric>(
        "SELECT * FROM performance_metric WHERE restaurant_id = $1 ORDER BY period_start DESC",
    )
    .bind(restaurant_id)
    .fetch_all(conn)
    .await?;

    Ok(metrics)
}

pub async fn get_metrics_by_period(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<PerformanceMetric>, ApiError> {
    let metrics = sqlx::query_as::<_, PerformanceMetric>(
        r#"SELECT * FROM performance_metric
           WHERE restaurant_id = $1
             AND created_at::date >= $2
             AND created_at::date <= $3
           ORDER BY period_start ASC"#,
    )
    .bind(restaurant_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(conn)
    .await?;

    Ok(metrics)
}

/// Metrics for every restaurant whose period falls inside the window
pub async fn get_all_restaurant_metrics(
    conn: &mut PgConnection,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<PerformanceMetric>, ApiError> {
    let metrics = sqlx::query_as::<_, PerformanceMetric>(
        "SELECT * FROM performance_metric WHERE period_start >= $1 AND period_end <= $2",
    )
    .bind(start_date)
    .bind(end_date)
    .fetch_all(conn)
    .await?;

    Ok(metrics)
}
