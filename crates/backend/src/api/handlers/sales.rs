use axum::{
    extract::{Json, Path, Query},
    http::StatusCode,
};
use contracts::domain::sale::{CreateSaleDto, UpdateSaleDto};
use serde::Deserialize;

use crate::domain::sales::repository::SaleFilters;
use crate::domain::sales::service;
use crate::shared::activity_log::log_activity;
use crate::system::auth::extractor::CurrentUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub start_date: String,
    pub end_date: String,
}

/// GET /api/sales
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<serde_json::Value>, StatusCode> {
    let filters = SaleFilters {
        start_date: query.start_date,
        end_date: query.end_date,
        category: query.category,
        payment_method: query.payment_method,
    };

    match service::list(filters).await {
        Ok(sales) => {
            let count = sales.len();
            Ok(Json(serde_json::json!({ "sales": sales, "count": count })))
        }
        Err(e) => {
            tracing::error!("Failed to list sales: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/sales/summary
pub async fn summary(
    Query(query): Query<SummaryQuery>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = async {
        let summary =
            crate::domain::sales::repository::get_summary(&query.start_date, &query.end_date)
                .await?;
        let by_category =
            crate::domain::sales::repository::get_by_category(&query.start_date, &query.end_date)
                .await?;
        let by_payment_method = crate::domain::sales::repository::get_by_payment_method(
            &query.start_date,
            &query.end_date,
        )
        .await?;
        let daily_sales =
            crate::domain::sales::repository::get_daily(&query.start_date, &query.end_date)
                .await?;
        anyhow::Ok(serde_json::json!({
            "summary": summary,
            "byCategory": by_category,
            "byPaymentMethod": by_payment_method,
            "dailySales": daily_sales,
        }))
    }
    .await;

    match result {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            tracing::error!("Failed to build sales summary: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/sales/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::get_by_id(&id).await {
        Ok(Some(sale)) => Ok(Json(serde_json::json!({ "sale": sale }))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get sale {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/sales
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CreateSaleDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    match service::create(dto, Some(claims.sub.clone())).await {
        Ok(sale) => {
            log_activity(Some(&claims.sub), "create_sale", Some("sale"), Some(&sale.id)).await;
            Ok((
                StatusCode::CREATED,
                Json(serde_json::json!({ "message": "Sale created successfully", "sale": sale })),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to create sale: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// PUT /api/sales/:id (manager/admin)
pub async fn update(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<UpdateSaleDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::update(&id, dto).await {
        Ok(Some(sale)) => {
            log_activity(Some(&claims.sub), "update_sale", Some("sale"), Some(&id)).await;
            Ok(Json(
                serde_json::json!({ "message": "Sale updated successfully", "sale": sale }),
            ))
        }
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update sale {}: {}", id, e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// DELETE /api/sales/:id (admin)
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::delete(&id).await {
        Ok(true) => {
            log_activity(Some(&claims.sub), "delete_sale", Some("sale"), Some(&id)).await;
            Ok(Json(
                serde_json::json!({ "message": "Sale deleted successfully" }),
            ))
        }
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete sale {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
