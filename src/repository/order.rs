use chrono::Utc;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Order, OrderStatus};

pub async fn create(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
    user_id: Uuid,
    interaction_id: Uuid,
    amount: i64,
) -> Result<Order, ApiError> {
    let order = sqlx::query_as::<_, Order>(
        r#"INSERT INTO "order" (order_id, restaurant_id, user_id, interaction_id, status, amount, created_at, updated_at)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
           RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(restaurant_id)
    .bind(user_id)
    .bind(interaction_id)
    .bind(OrderStatus::New)
    .bind(amount)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(order)
}

pub async fn get_by_id(conn: &mut PgConnection, order_id: Uuid) -> Result<Option<Order>, ApiError> {
    let order = sqlx::query_as::<_, Order>(r#"SELECT * FROM "order" WHERE order_id = $1"#)
        .bind(order_id)
        .fetch_optional(conn)
        .await?;

    Ok(order)
}

pub async fn get_by_restaurant(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
) -> Result<Vec<Order>, ApiError> {
    let orders = sqlx::query_as::<_, Order>(
        r#"SELECT * FROM "order" WHERE restaurant_id = $1 ORDER BY created_at DESC"#,
    )
    .bind(restaurant_id)
    .fetch_all(conn)
    .await?;

    Ok(orders)
}

pub async fn update_status(
    conn: &mut PgConnection,
    order_id: Uuid,
    status: OrderStatus,
) -> Result<Option<Order>, ApiError> {
    let order = sqlx::query_as::<_, Order>(
        r#"UPDATE "order"
           SET status = $2, updated_at = $3
           WHERE order_id = $1
           RETURNING *"#,
    )
    .bind(order_id)
    .bind(status)
    .bind(Utc::now())
    .fetch_optional(conn)
    .await?;

    Ok(order)
}
