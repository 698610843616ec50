use axum::{
    extract::{Json, Path, Query},
    http::StatusCode,
};
use contracts::domain::employee::{CreateEmployeeDto, UpdateEmployeeDto};
use serde::Deserialize;

use crate::domain::employees::service;
use crate::shared::activity_log::log_activity;
use crate::system::auth::extractor::CurrentUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/employees
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::list(query.include_inactive).await {
        Ok(employees) => {
            let count = employees.len();
            Ok(Json(
                serde_json::json!({ "employees": employees, "count": count }),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to list employees: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/employees/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::get_by_id(&id).await {
        Ok(Some(employee)) => Ok(Json(serde_json::json!({ "employee": employee }))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get employee {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/employees (manager/admin)
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CreateEmployeeDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    match service::create(dto).await {
        Ok(employee) => {
            log_activity(
                Some(&claims.sub),
                "create_employee",
                Some("employee"),
                Some(&employee.id),
            )
            .await;
            Ok((
                StatusCode::CREATED,
                Json(serde_json::json!({
                    "message": "Employee created successfully",
                    "employee": employee
                })),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to create employee: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// PUT /api/employees/:id (manager/admin)
pub async fn update(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<UpdateEmployeeDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::update(&id, dto).await {
        Ok(Some(employee)) => {
            log_activity(Some(&claims.sub), "update_employee", Some("employee"), Some(&id)).await;
            Ok(Json(serde_json::json!({
                "message": "Employee updated successfully",
                "employee": employee
            })))
        }
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update employee {}: {}", id, e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// DELETE /api/employees/:id — деактивация (admin)
pub async fn deactivate(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::deactivate(&id).await {
        Ok(Some(employee)) => {
            log_activity(
                Some(&claims.sub),
                "deactivate_employee",
                Some("employee"),
                Some(&id),
            )
            .await;
            Ok(Json(serde_json::json!({
                "message": "Employee deactivated successfully",
                "employee": employee
            })))
        }
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to deactivate employee {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
