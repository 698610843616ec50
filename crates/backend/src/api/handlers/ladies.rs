use axum::{
    extract::{Json, Path, Query},
    http::StatusCode,
};
use contracts::domain::lady::{CreateLadyDto, UpdateLadyDto};
use serde::Deserialize;

use crate::domain::ladies::service;
use crate::shared::activity_log::log_activity;
use crate::system::auth::extractor::CurrentUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/ladies
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::list(query.include_inactive).await {
        Ok(ladies) => {
            let count = ladies.len();
            Ok(Json(serde_json::json!({ "ladies": ladies, "count": count })))
        }
        Err(e) => {
            tracing::error!("Failed to list ladies: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/ladies/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::get_by_id(&id).await {
        Ok(Some(lady)) => Ok(Json(serde_json::json!({ "lady": lady }))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get lady {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/ladies (manager/admin)
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CreateLadyDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    match service::create(dto).await {
        Ok(lady) => {
            log_activity(Some(&claims.sub), "create_lady", Some("lady"), Some(&lady.id)).await;
            Ok((
                StatusCode::CREATED,
                Json(serde_json::json!({ "message": "Lady created successfully", "lady": lady })),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to create lady: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// PUT /api/ladies/:id (manager/admin)
pub async fn update(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<UpdateLadyDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::update(&id, dto).await {
        Ok(Some(lady)) => {
            log_activity(Some(&claims.sub), "update_lady", Some("lady"), Some(&id)).await;
            Ok(Json(
                serde_json::json!({ "message": "Lady updated successfully", "lady": lady }),
            ))
        }
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update lady {}: {}", id, e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// DELETE /api/ladies/:id — деактивация, история напитков сохраняется
pub async fn deactivate(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::deactivate(&id).await {
        Ok(Some(lady)) => {
            log_activity(Some(&claims.sub), "deactivate_lady", Some("lady"), Some(&id)).await;
            Ok(Json(serde_json::json!({
                "message": "Lady deactivated successfully",
                "lady": lady
            })))
        }
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to deactivate lady {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
