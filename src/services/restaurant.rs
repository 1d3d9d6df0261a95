use uuid::Uuid;

use crate::db::PgScope;
use crate::error::ApiError;
use crate::models::{Restaurant, RestaurantStatus};
use crate::repository;
use crate::repository::restaurant::RestaurantChanges;

pub struct RestaurantService {
    scope: PgScope,
}

impl RestaurantService {
    pub fn new(scope: PgScope) -> Self {
        Self { scope }
    }

    pub async fn create_restaurant(
        &self,
        name: String,
        address: String,
        phone: String,
        email: String,
    ) -> Result<Restaurant, ApiError> {
        self.scope
            .run(move |tx| {
                Box::pin(async move {
                    repository::restaurant::create(tx, &name, &address, &phone, &email).await
                })
            })
            .await
    }

    pub async fn get_restaurant_by_id(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Option<Restaurant>, ApiError> {
        self.scope
            .run(move |tx| {
                Box::pin(async move { repository::restaurant::get_by_id(tx, restaurant_id).await })
            })
            .await
    }

    pub async fn get_all_restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        self.scope
            .run(|tx| Box::pin(async move { repository::restaurant::get_all(tx).await }))
            .await
    }

    pub async fn update_restaurant(
        &self,
        restaurant_id: Uuid,
        changes: RestaurantChanges,
    ) -> Result<Option<Restaurant>, ApiError> {
        self.scope
            .run(move |tx| {
                Box::pin(async move {
                    repository::restaurant::update(tx, restaurant_id, changes).await
                })
            })
            .await
    }

    pub async fn update_restaurant_status(
        &self,
        restaurant_id: Uuid,
        status: RestaurantStatus,
    ) -> Result<Option<Restaurant>, ApiError> {
        self.scope
            .run(move |tx| {
                Box::pin(async move {
                    repository::restaurant::update_status(tx, restaurant_id, status).await
                })
            })
            .await
    }

    pub async fn delete_restaurant(&self, restaurant_id: Uuid) -> Result<bool, ApiError> {
        self.scope
            .run(move |tx| {
                Box::pin(async move { repository::restaurant::delete(tx, restaurant_id).await })
            })
            .await
    }
}
