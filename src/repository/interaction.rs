use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Interaction, InteractionType};

pub async fn create(
    conn: &mut PgConnection,
    user_id: Uuid,
    restaurant_id: Uuid,
    interaction_type: InteractionType,
    interaction_date: DateTime<Utc>,
    notes: Option<&str>,
) -> Result<Interaction, ApiError> {
    let interaction = sqlx::query_as::<_, Interaction>(
        r#"INSERT INTO interaction (interaction_id, user_id, restaurant_id, interaction_type, interaction_date, notes)
           VALUES ($1, $2, $3, $4, $5, $6)
           RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(restaurant_id)
    .bind(interaction_type)
    .bind(interaction_date)
    .bind(notes)
    .fetch_one(conn)
    .await?;

    Ok(interaction)
}

pub async fn get_all(conn: &mut PgConnection) -> Result<Vec<Interaction>, ApiError> {
    let interactions =
        sqlx::query_as::<_, Interaction>("SELECT * FROM interaction ORDER BY interaction_date DESC")
            .fetch_all(conn)
            .await?;

    Ok(interactions)
}

pub async fn get_by_id(
    conn: &mut PgConnection,
    interaction_id: Uuid,
) -> Result<Option<Interaction>, ApiError> {
    let interaction =
        sqlx::query_as::<_, Interaction>("SELECT * FROM interaction WHERE interaction_id = $1")
            .bind(interaction_id)
            .fetch_optional(conn)
            .await?;

    Ok(interaction)
}

pub async fn get_by_restaurant(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
) -> Result<Vec<Interaction>, ApiError> {
    let interactions = sqlx::query_as::<_, Interaction>(
        "SELECT * FROM interaction WHERE restaurant_id = $1 ORDER BY interaction_date DESC",
    )
    .bind(restaurant_id)
    .fetch_all(conn)
    .await?;

    Ok(interactions)
}

pub async fn get_by_contact(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<Vec<Interaction>, ApiError> {
    let interactions = sqlx::query_as::<_, Interaction>(
        "SELECT * FROM interaction WHERE user_id = $1 ORDER BY interaction_date DESC",
    )
    .bind(user_id)
    .fetch_all(conn)
    .await?;

    Ok(interactions)
}
