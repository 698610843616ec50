use axum::{
    extract::{Json, Path, Query},
    http::StatusCode,
};
use contracts::domain::lady::SaveLadyDrinksDto;
use serde::Deserialize;

use crate::domain::lady_drinks::service;
use crate::shared::activity_log::log_activity;
use crate::system::auth::extractor::CurrentUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub start_date: String,
    pub end_date: String,
}

/// POST /api/lady-drinks — сохранение учёта за день (полная замена даты)
pub async fn save_for_date(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<SaveLadyDrinksDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    let date = dto.date.clone();
    match service::save_for_date(dto, Some(claims.sub.clone())).await {
        Ok(results) => {
            log_activity(
                Some(&claims.sub),
                "save_lady_drinks",
                Some("lady_drinks"),
                Some(&date),
            )
            .await;
            Ok((
                StatusCode::CREATED,
                Json(serde_json::json!({
                    "message": "Lady drinks saved successfully",
                    "results": results
                })),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to save lady drinks for {}: {}", date, e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// GET /api/lady-drinks/summary
pub async fn summary(
    Query(query): Query<RangeQuery>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::get_summary(&query.start_date, &query.end_date).await {
        Ok(summary) => {
            let count = summary.len();
            Ok(Json(
                serde_json::json!({ "summary": summary, "count": count }),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to get lady drinks summary: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/lady-drinks?startDate=..&endDate=..
pub async fn list_by_range(
    Query(query): Query<RangeQuery>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::get_by_date_range(&query.start_date, &query.end_date).await {
        Ok(drinks) => {
            let count = drinks.len();
            Ok(Json(
                serde_json::json!({ "ladyDrinks": drinks, "count": count }),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to list lady drinks: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/lady-drinks/:date
pub async fn get_by_date(
    Path(date): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::get_by_date(&date).await {
        Ok(drinks) => {
            let count = drinks.len();
            Ok(Json(
                serde_json::json!({ "ladyDrinks": drinks, "count": count }),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to get lady drinks for {}: {}", date, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
