use chrono::Utc;
use uuid::Uuid;

use crate::db::PgScope;
use crate::error::ApiError;
use crate::models::{InteractionType, Order, OrderStatus};
use crate::repository;

pub struct OrderService {
    scope: PgScope,
}

impl OrderService {
    pub fn new(scope: PgScope) -> Self {
        Self { scope }
    }

    /// Place a new order.
    ///
    /// The interaction record and the order row are written inside one
    /// transaction scope - if either insert fails, neither is visible.
    pub async fn place_order(
        &self,
        restaurant_id: Uuid,
        user_id: Uuid,
        amount: i64,
        notes: Option<String>,
    ) -> Result<Order, ApiError> {
        let placed_at = Utc::now();

        self.scope
            .run(move |tx| {
                Box::pin(async move {
                    let interaction = repository::interaction::create(
                        &mut *tx,
                        user_id,
                        restaurant_id,
                        InteractionType::Order,
                        placed_at,
                        notes.as_deref(),
                    )
                    .await?;

                    repository::order::create(
                        &mut *tx,
                        restaurant_id,
                        user_id,
                        interaction.interaction_id,
                        amount,
                    )
                    .await
                })
            })
            .await
    }

    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.scope
            .run(move |tx| {
                Box::pin(async move {
                    repository::order::update_status(tx, order_id, new_status)
                        .await?
                        .ok_or_else(|| ApiError::not_found("Order not found"))
                })
            })
            .await
    }

    pub async fn get_restaurant_orders(&self, restaurant_id: Uuid) -> Result<Vec<Order>, ApiError> {
        self.scope
            .run(move |tx| {
                Box::pin(async move { repository::order::get_by_restaurant(tx, restaurant_id).await })
            })
            .await
    }
}
