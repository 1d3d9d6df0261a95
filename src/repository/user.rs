use chrono::Utc;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{User, UserRole};

/// Partial update of a contact; `None` fields keep their current value
#[derive(Debug, Default, Clone)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
}

pub async fn create(
    conn: &mut PgConnection,
    name: &str,
    email: &str,
    phone: &str,
    role: UserRole,
    restaurant_id: Uuid,
    hashed_password: &str,
) -> Result<User, ApiError> {
    let user = sqlx::query_as::<_, User>(
        r#"INSERT INTO "user" (user_id, name, email, phone, role, hashed_password, restaurant_id, created_at, updated_at)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
           RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(role)
    .bind(hashed_password)
    .bind(restaurant_id)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(user)
}

pub async fn get_all(conn: &mut PgConnection) -> Result<Vec<User>, ApiError> {
    let users = sqlx::query_as::<_, User>(r#"SELECT * FROM "user" ORDER BY created_at"#)
        .fetch_all(conn)
        .await?;

    Ok(users)
}

pub async fn get_by_id(conn: &mut PgConnection, user_id: Uuid) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>(r#"SELECT * FROM "user" WHERE user_id = $1"#)
        .bind(user_id)
        .fetch_optional(conn)
        .await?;

    Ok(user)
}

/// Lookup by login identifier; the authentication data source
pub async fn get_by_email(conn: &mut PgConnection, email: &str) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>(r#"SELECT * FROM "user" WHERE email = $1"#)
        .bind(email)
        .fetch_optional(conn)
        .await?;

    Ok(user)
}

pub async fn get_by_restaurant(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
) -> Result<Vec<User>, ApiError> {
    let users = sqlx::query_as::<_, User>(
        r#"SELECT * FROM "user" WHERE restaurant_id = $1 ORDER BY created_at"#,
    )
    .bind(restaurant_id)
    .fetch_all(conn)
    .await?;

    Ok(users)
}

pub async fn update(
    conn: &mut PgConnection,
    user_id: Uuid,
    changes: UserChanges,
) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>(
        r#"UPDATE "user"
           SET name = COALESCE($2, name),
               email = COALESCE($3, email),
               phone = COALESCE($4, phone),
               role = COALESCE($5, role),
               updated_at = $6
           WHERE user_id = $1
           RETURNING *"#,
    )
    .bind(user_id)
    .bind(changes.name)
    .bind(changes.email)
    .bind(changes.phone)
    .bind(changes.role)
    .bind(Utc::now())
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

pub async fn delete(conn: &mut PgConnection, user_id: Uuid) -> Result<bool, ApiError> {
    let result = sqlx::query(r#"DELETE FROM "user" WHERE user_id = $1"#)
        .bind(user_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
