//! Analytics API endpoints

use api_types::{
    analytics::{CategoryTotals, DateRangeTotal},
    expense::DateRange,
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{ServerError, server::ServerState};

/// Sum of amounts per category
pub async fn total_by_category(
    State(state): State<ServerState>,
) -> Result<Json<CategoryTotals>, ServerError> {
    let totals = state
        .engine
        .total_by_category()
        .await?
        .into_iter()
        .map(|(category, total)| (category, total.to_decimal()))
        .collect();
    Ok(Json(totals))
}

/// Sum of amounts in an inclusive date range, `0.00` when empty
pub async fn total_by_date_range(
    State(state): State<ServerState>,
    range: Result<Query<DateRange>, QueryRejection>,
) -> Result<Json<DateRangeTotal>, ServerError> {
    let Query(range) = range?;
    let total = state
        .engine
        .total_by_date_range(range.start_date, range.end_date)
        .await?;
    Ok(Json(DateRangeTotal {
        total: total.to_decimal(),
    }))
}
