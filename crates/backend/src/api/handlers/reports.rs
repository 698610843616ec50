use axum::{
    extract::{Json, Query},
    http::StatusCode,
};
use contracts::reports::{DashboardReport, FinancialReport};
use serde::Deserialize;

use crate::reports::service;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// GET /api/reports/financial
pub async fn financial(
    Query(query): Query<PeriodQuery>,
) -> Result<Json<FinancialReport>, StatusCode> {
    match service::financial_report(&query.start_date, &query.end_date).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            tracing::error!("Failed to generate financial report: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/reports/dashboard
pub async fn dashboard() -> Result<Json<DashboardReport>, StatusCode> {
    match service::dashboard().await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            tracing::error!("Failed to get dashboard data: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/reports/activity-logs (manager/admin)
pub async fn activity_logs(
    Query(query): Query<LogsQuery>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let limit = query.limit.unwrap_or(50);
    let offset = query.offset.unwrap_or(0);

    match service::activity_logs(limit, offset).await {
        Ok(logs) => Ok(Json(serde_json::json!({ "logs": logs }))),
        Err(e) => {
            tracing::error!("Failed to get activity logs: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
