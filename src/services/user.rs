use uuid::Uuid;

use crate::db::PgScope;
use crate::error::ApiError;
use crate::models::User;
use crate::repository;
use crate::repository::user::UserChanges;

pub struct UserService {
    scope: PgScope,
}

impl UserService {
    pub fn new(scope: PgScope) -> Self {
        Self { scope }
    }

    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, ApiError> {
        self.scope
            .run(move |tx| Box::pin(async move { repository::user::get_by_id(tx, user_id).await }))
            .await
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>, ApiError> {
        self.scope
            .run(|tx| Box::pin(async move { repository::user::get_all(tx).await }))
            .await
    }

    pub async fn get_users_by_restaurant(&self, restaurant_id: Uuid) -> Result<Vec<User>, ApiError> {
        self.scope
            .run(move |tx| {
                Box::pin(async move { repository::user::get_by_restaurant(tx, restaurant_id).await })
            })
            .await
    }

    pub async fn update_user(
        &self,
        user_id: Uuid,
        changes: UserChanges,
    ) -> Result<Option<User>, ApiError> {
        self.scope
            .run(move |tx| {
                Box::pin(async move { repository::user::update(tx, user_id, changes).await })
            })
            .await
    }

    pub async fn delete_user(&self, user_id: Uuid) -> Result<bool, ApiError> {
        self.scope
            .run(move |tx| Box::pin(async move { repository::user::delete(tx, user_id).await }))
            .await
    }
}
