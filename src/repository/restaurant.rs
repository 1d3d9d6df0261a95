use chrono::Utc;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Restaurant, RestaurantStatus};

#[derive(Debug, Default, Clone)]
pub struct RestaurantChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

pub async fn create(
    conn: &mut PgConnection,
    name: &str,
    address: &str,
    phone: &str,
    email: &str,
) -> Result<Restaurant, ApiError> {
    let restaurant = sqlx::query_as::<_, Restaurant>(
        r#"INSERT INTO restaurant (restaurant_id, name, address, phone, email, status, created_at, updated_at)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
           RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(address)
    .bind(phone)
    .bind(email)
    .bind(RestaurantStatus::New)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(restaurant)
}

pub async fn get_all(conn: &mut PgConnection) -> Result<Vec<Restaurant>, ApiError> {
    let restaurants = sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurant ORDER BY created_at")
        .fetch_all(conn)
        .await?;

    Ok(restaurants)
}

pub async fn get_by_id(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
) -> Result<Option<Restaurant>, ApiError> {
    let restaurant =
        sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurant WHERE restaurant_id = $1")
            .bind(restaurant_id)
            .fetch_optional(conn)
            .await?;

    Ok(restaurant)
}

pub async fn update(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
    changes: RestaurantChanges,
) -> Result<Option<Restaurant>, ApiError> {
    let restaurant = sqlx::query_as::<_, Restaurant>(
        r#"UPDATE restaurant
           SET name = COALESCE($2, name),
               address = COALESCE($3, address),
               phone = COALESCE($4, phone),
               email = COALESCE($5, email),
               updated_at = $6
           WHERE restaurant_id = $1
           RETURNING *"#,
    )
    .bind(restaurant_id)
    .bind(changes.name)
    .bind(changes.address)
    .bind(changes.phone)
    .bind(changes.email)
    .bind(Utc::now())
    .fetch_optional(conn)
    .await?;

    Ok(restaurant)
}

pub async fn update_status(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
    status: RestaurantStatus,
) -> Result<Option<Restaurant>, ApiError> {
    let restaurant = sqlx::query_as::<_, Restaurant>(
        r#"UPDATE restaurant
           SET status = $2, updated_at = $3
           WHERE restaurant_id = $1
           RETURNING *"#,
    )
    .bind(restaurant_id)
    .bind(status)
    .bind(Utc::now())
    .fetch_optional(conn)
    .await?;

    Ok(restaurant)
}

pub async fn delete(conn: &mut PgConnection, restaurant_id: Uuid) -> Result<bool, ApiError> {
    let result = sqlx::query("DELETE FROM restaurant WHERE restaurant_id = $1")
        .bind(restaurant_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
