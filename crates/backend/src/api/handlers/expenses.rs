use axum::{
    extract::{Json, Path, Query},
    http::StatusCode,
};
use contracts::domain::expense::{CreateExpenseDto, UpdateExpenseDto};
use serde::Deserialize;

use crate::domain::expenses::repository::ExpenseFilters;
use crate::domain::expenses::service;
use crate::shared::activity_log::log_activity;
use crate::system::auth::extractor::CurrentUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub start_date: String,
    pub end_date: String,
}

/// GET /api/expenses
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<serde_json::Value>, StatusCode> {
    let filters = ExpenseFilters {
        start_date: query.start_date,
        end_date: query.end_date,
        category: query.category,
    };

    match service::list(filters).await {
        Ok(expenses) => {
            let count = expenses.len();
            Ok(Json(
                serde_json::json!({ "expenses": expenses, "count": count }),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to list expenses: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/expenses/summary
pub async fn summary(
    Query(query): Query<SummaryQuery>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = async {
        let summary = crate::domain::expenses::repository::get_summary(
            &query.start_date,
            &query.end_date,
        )
        .await?;
        let by_category = crate::domain::expenses::repository::get_by_category(
            &query.start_date,
            &query.end_date,
        )
        .await?;
        let daily = crate::domain::expenses::repository::get_daily(
            &query.start_date,
            &query.end_date,
        )
        .await?;
        anyhow::Ok(serde_json::json!({
            "summary": summary,
            "byCategory": by_category,
            "dailyExpenses": daily,
        }))
    }
    .await;

    match result {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            tracing::error!("Failed to build expenses summary: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/expenses/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::get_by_id(&id).await {
        Ok(Some(expense)) => Ok(Json(serde_json::json!({ "expense": expense }))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get expense {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/expenses
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CreateExpenseDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    match service::create(dto, Some(claims.sub.clone())).await {
        Ok(expense) => {
            log_activity(
                Some(&claims.sub),
                "create_expense",
                Some("expense"),
                Some(&expense.id),
            )
            .await;
            Ok((
                StatusCode::CREATED,
                Json(serde_json::json!({
                    "message": "Expense created successfully",
                    "expense": expense
                })),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to create expense: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// PUT /api/expenses/:id (manager/admin)
pub async fn update(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<UpdateExpenseDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::update(&id, dto).await {
        Ok(Some(expense)) => {
            log_activity(Some(&claims.sub), "update_expense", Some("expense"), Some(&id)).await;
            Ok(Json(serde_json::json!({
                "message": "Expense updated successfully",
                "expense": expense
            })))
        }
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update expense {}: {}", id, e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// DELETE /api/expenses/:id (admin)
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::delete(&id).await {
        Ok(true) => {
            log_activity(Some(&claims.sub), "delete_expense", Some("expense"), Some(&id)).await;
            Ok(Json(
                serde_json::json!({ "message": "Expense deleted successfully" }),
            ))
        }
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete expense {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
