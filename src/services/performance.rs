use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::PgScope;
use crate::error::ApiError;
use crate::models::PerformanceMetric;
use crate::repository;

/// Metric a ranking can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMetric {
    TotalOrders,
    TotalAmount,
    AverageOrderValue,
    OrderFrequency,
}

impl RankingMetric {
    fn value_of(&self, metric: &PerformanceMetric) -> f64 {
        match self {
            RankingMetric::TotalOrders => metric.total_orders as f64,
            RankingMetric::TotalAmount => metric.total_amount,
            RankingMetric::AverageOrderValue => metric.average_order_value,
            RankingMetric::OrderFrequency => metric.order_frequency,
        }
    }
}

impl FromStr for RankingMetric {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "total_orders" => Ok(RankingMetric::TotalOrders),
            "total_amount" => Ok(RankingMetric::TotalAmount),
            "average_order_value" => Ok(RankingMetric::AverageOrderValue),
            "order_frequency" => Ok(RankingMetric::OrderFrequency),
            other => Err(ApiError::bad_request(format!("Unknown ranking metric: {}", other))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TrendSummary {
    pub orders: f64,
    pub revenue: f64,
    pub avg_order_value: f64,
    pub order_frequency: f64,
}

#[derive(Debug, Serialize)]
pub struct TrendAnalysis {
    pub trends: TrendSummary,
    pub metrics: Vec<PerformanceMetric>,
}

#[derive(Debug, Serialize)]
pub struct RestaurantRanking {
    pub restaurant_id: Uuid,
    pub metric_value: f64,
}

/// Percentage change from the first to the last value
fn calculate_trend(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let (first, last) = (values[0], values[values.len() - 1]);
    if first == 0.0 {
        return 0.0;
    }
    (last - first) / first * 100.0
}

pub struct PerformanceService {
    scope: PgScope,
}

impl PerformanceService {
    pub fn new(scope: PgScope) -> Self {
        Self { scope }
    }

    /// Aggregate one calendar month of orders into a persisted metric row
    pub async fn generate_monthly_metrics(
        &self,
        restaurant_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<PerformanceMetric, ApiError> {
        let start_date = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| ApiError::bad_request("Invalid year or month"))?;

        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end_date = next_month.ok_or_else(|| ApiError::bad_request("Invalid year or month"))?
            - Duration::days(1);

        self.scope
            .run(move |tx| {
                Box::pin(async move {
                    repository::performance::calculate_metrics(tx, restaurant_id, start_date, end_date)
                        .await
                })
            })
            .await
    }

    pub async fn get_restaurant_performance(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<PerformanceMetric>, ApiError> {
        self.scope
            .run(move |tx| {
                Box::pin(async move {
                    repository::performance::get_restaurant_metrics(tx, restaurant_id).await
                })
            })
            .await
    }

    /// Trend percentages over the metrics recorded in the last `months`
    /// months
    pub async fn analyze_restaurant_trends(
        &self,
        restaurant_id: Uuid,
        months: i64,
    ) -> Result<TrendAnalysis, ApiError> {
        let end_date = Utc::now().date_naive();
        let start_date = end_date - Duration::days(months * 30);

        let mut metrics = self
            .scope
            .run(move |tx| {
                Box::pin(async move {
                    repository::performance::get_metrics_by_period(tx, restaurant_id, start_date, end_date)
                        .await
                })
            })
            .await?;

        if metrics.is_empty() {
            return Err(ApiError::not_found("No metrics found for this period"));
        }

        // Trend direction depends on chronological order
        metrics.sort_by_key(|m| m.period_start);

        let trends = TrendSummary {
            orders: calculate_trend(
                &metrics.iter().map(|m| m.total_orders as f64).collect::<Vec<_>>(),
            ),
            revenue: calculate_trend(&metrics.iter().map(|m| m.total_amount).collect::<Vec<_>>()),
            avg_order_value: calculate_trend(
                &metrics.iter().map(|m| m.average_order_value).collect::<Vec<_>>(),
            ),
            order_frequency: calculate_trend(
                &metrics.iter().map(|m| m.order_frequency).collect::<Vec<_>>(),
            ),
        };

        Ok(TrendAnalysis { trends, metrics })
    }

    /// Rank restaurants by one metric over roughly the last month
    pub async fn get_restaurant_rankings(
        &self,
        metric: RankingMetric,
        limit: usize,
    ) -> Result<Vec<RestaurantRanking>, ApiError> {
        let end_date = Utc::now().date_naive();
        let start_date = end_date - Duration::days(30);

        let mut metrics = self
            .scope
            .run(move |tx| {
                Box::pin(async move {
                    repository::performance::get_all_restaurant_metrics(tx, start_date, end_date)
                        .await
                })
            })
            .await?;

        metrics.sort_by(|a, b| {
            metric
                .value_of(b)
                .partial_cmp(&metric.value_of(a))
                .unwrap_or(Ordering::Equal)
        });
        metrics.truncate(limit);

        Ok(metrics
            .into_iter()
            .map(|m| RestaurantRanking {
                restaurant_id: m.restaurant_id,
                metric_value: metric.value_of(&m),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_needs_at_least_two_points() {
        assert_eq!(calculate_trend(&[]), 0.0);
        assert_eq!(calculate_trend(&[42.0]), 0.0);
    }

    #[test]
    fn trend_is_percentage_change() {
        assert_eq!(calculate_trend(&[100.0, 150.0]), 50.0);
        assert_eq!(calculate_trend(&[200.0, 100.0]), -50.0);
        // Intermediate values only set the path, not the trend
        assert!((calculate_trend(&[100.0, 700.0, 110.0]) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn trend_from_zero_is_zero() {
        assert_eq!(calculate_trend(&[0.0, 50.0]), 0.0);
    }

    #[test]
    fn ranking_metric_parses_known_keys() {
        assert_eq!("total_orders".parse::<RankingMetric>().unwrap(), RankingMetric::TotalOrders);
        assert_eq!(
            "average_order_value".parse::<RankingMetric>().unwrap(),
            RankingMetric::AverageOrderValue
        );
        assert!("revenue_per_seat".parse::<RankingMetric>().is_err());
    }
}
