use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::db::PgScope;
use crate::error::ApiError;
use crate::models::CallPlan;
use crate::repository;

pub struct CallPlanService {
    scope: PgScope,
}

impl CallPlanService {
    pub fn new(scope: PgScope) -> Self {
        Self { scope }
    }

    /// Create a plan; the first call comes due one frequency interval from
    /// today
    pub async fn create_call_plan(
        &self,
        restaurant_id: Uuid,
        user_id: Uuid,
        frequency_days: i32,
        notes: Option<String>,
    ) -> Result<CallPlan, ApiError> {
        if frequency_days <= 0 {
            return Err(ApiError::bad_request("frequency_days must be positive"));
        }

        let next_call_date = Utc::now().date_naive() + Duration::days(frequency_days as i64);

        self.scope
            .run(move |tx| {
                Box::pin(async move {
                    repository::call_plan::create(
                        tx,
                        restaurant_id,
                        user_id,
                        frequency_days,
                        next_call_date,
                        notes.as_deref(),
                    )
                    .await
                })
            })
            .await
    }

    pub async fn get_due_calls(&self, due_date: Option<NaiveDate>) -> Result<Vec<CallPlan>, ApiError> {
        let due_date = due_date.unwrap_or_else(|| Utc::now().date_naive());

        self.scope
            .run(move |tx| {
                Box::pin(async move { repository::call_plan::get_due_calls(tx, due_date).await })
            })
            .await
    }

    pub async fn record_call_made(
        &self,
        call_plan_id: Uuid,
        call_date: Option<NaiveDate>,
    ) -> Result<Option<CallPlan>, ApiError> {
        let call_date = call_date.unwrap_or_else(|| Utc::now().date_naive());

        self.scope
            .run(move |tx| {
                Box::pin(async move {
                    repository::call_plan::update_after_call(tx, call_plan_id, call_date).await
                })
            })
            .await
    }
}
