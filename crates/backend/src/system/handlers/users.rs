use axum::{
    extract::{Json, Path},
    http::StatusCode,
};
use contracts::system::users::{ChangePasswordDto, CreateUserDto, UpdateUserDto, User};

use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// GET /api/users
pub async fn list() -> Result<Json<Vec<User>>, StatusCode> {
    match service::list_all().await {
        Ok(users) => Ok(Json(users)),
        Err(e) => {
            tracing::error!("Failed to list users: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/users
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CreateUserDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::create(dto, Some(claims.sub)).await {
        Ok(id) => Ok(Json(serde_json::json!({ "id": id }))),
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// GET /api/users/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<User>, StatusCode> {
    match service::get_by_id(&id).await {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get user {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PUT /api/users/:id
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<UpdateUserDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    dto.id = id;
    match service::update(dto).await {
        Ok(()) => Ok(Json(serde_json::json!({ "success": true }))),
        Err(e) => {
            tracing::error!("Failed to update user: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// DELETE /api/users/:id
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    // Users cannot delete themselves
    if claims.sub == id {
        return Err(StatusCode::BAD_REQUEST);
    }

    match service::delete(&id).await {
        Ok(true) => Ok(Json(serde_json::json!({ "success": true }))),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete user {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/users/:id/change-password
pub async fn change_password(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(mut dto): Json<ChangePasswordDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    dto.user_id = id;
    match service::change_password(dto, &claims.sub).await {
        Ok(()) => Ok(Json(serde_json::json!({ "success": true }))),
        Err(e) => {
            tracing::error!("Failed to change password: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}
