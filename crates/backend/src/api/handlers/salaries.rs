use axum::{
    extract::{Json, Path, Query},
    http::StatusCode,
};
use contracts::domain::salary::{CreateSalaryDto, UpdateSalaryDto};
use serde::Deserialize;

use crate::domain::salaries::service;
use crate::shared::activity_log::log_activity;
use crate::system::auth::extractor::CurrentUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub start_date: String,
    pub end_date: String,
}

/// GET /api/salaries
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::list(query.start_date, query.end_date).await {
        Ok(salaries) => {
            let count = salaries.len();
            Ok(Json(
                serde_json::json!({ "salaries": salaries, "count": count }),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to list salaries: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/salaries/summary
pub async fn summary(
    Query(query): Query<SummaryQuery>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match crate::domain::salaries::repository::get_summary(&query.start_date, &query.end_date)
        .await
    {
        Ok(summary) => Ok(Json(serde_json::json!({ "summary": summary }))),
        Err(e) => {
            tracing::error!("Failed to get salaries summary: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/salaries/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::get_by_id(&id).await {
        Ok(Some(salary)) => Ok(Json(serde_json::json!({ "salary": salary }))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get salary {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/salaries (manager/admin)
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CreateSalaryDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    match service::create(dto, Some(claims.sub.clone())).await {
        Ok(salary) => {
            log_activity(
                Some(&claims.sub),
                "create_salary",
                Some("salary"),
                Some(&salary.id),
            )
            .await;
            Ok((
                StatusCode::CREATED,
                Json(serde_json::json!({
                    "message": "Salary created successfully",
                    "salary": salary
                })),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to create salary: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// PUT /api/salaries/:id (manager/admin)
pub async fn update(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<UpdateSalaryDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::update(&id, dto).await {
        Ok(Some(salary)) => {
            log_activity(Some(&claims.sub), "update_salary", Some("salary"), Some(&id)).await;
            Ok(Json(serde_json::json!({
                "message": "Salary updated successfully",
                "salary": salary
            })))
        }
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update salary {}: {}", id, e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// DELETE /api/salaries/:id (admin)
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::delete(&id).await {
        Ok(true) => {
            log_activity(Some(&claims.sub), "delete_salary", Some("salary"), Some(&id)).await;
            Ok(Json(
                serde_json::json!({ "message": "Salary deleted successfully" }),
            ))
        }
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete salary {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
