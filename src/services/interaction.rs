use chrono::Utc;
use uuid::Uuid;

use crate::db::PgScope;
use crate::error::ApiError;
use crate::models::{Interaction, InteractionType};
use crate::repository;

pub struct InteractionService {
    scope: PgScope,
}

impl InteractionService {
    pub fn new(scope: PgScope) -> Self {
        Self { scope }
    }

    /// Record a touchpoint, stamped with the current time
    pub async fn create_interaction(
        &self,
        user_id: Uuid,
        restaurant_id: Uuid,
        interaction_type: InteractionType,
        notes: Option<String>,
    ) -> Result<Interaction, ApiError> {
        let interaction_date = Utc::now();

        self.scope
            .run(move |tx| {
                Box::pin(async move {
                    repository::interaction::create(
                        tx,
                        user_id,
                        restaurant_id,
                        interaction_type,
                        interaction_date,
                        notes.as_deref(),
                    )
                    .await
                })
            })
            .await
    }

    pub async fn get_all_interactions(&self) -> Result<Vec<Interaction>, ApiError> {
        self.scope
            .run(|tx| Box::pin(async move { repository::interaction::get_all(tx).await }))
            .await
    }

    pub async fn get_interaction_by_id(
        &self,
        interaction_id: Uuid,
    ) -> Result<Option<Interaction>, ApiError> {
        self.scope
            .run(move |tx| {
                Box::pin(async move { repository::interaction::get_by_id(tx, interaction_id).await })
            })
            .await
    }

    pub async fn get_interactions_by_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<Interaction>, ApiError> {
        self.scope
            .run(move |tx| {
                Box::pin(async move {
                    repository::interaction::get_by_restaurant(tx, restaurant_id).await
                })
            })
            .await
    }

    pub async fn get_interactions_by_contact(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Interaction>, ApiError> {
        self.scope
            .run(move |tx| {
                Box::pin(async move { repository::interaction::get_by_contact(tx, user_id).await })
            })
            .await
    }
}
