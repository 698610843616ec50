use std::path::{Path, PathBuf};

use axum::{
    extract::{Json, Multipart},
    http::StatusCode,
};
use contracts::domain::import::ImportOptions;

use crate::shared::activity_log::log_activity;
use crate::system::auth::extractor::CurrentUser;
use crate::usecases::import_sales;

/// Каталог временных файлов импорта
const UPLOAD_DIR: &str = "target/uploads";

type ErrorResponse = (StatusCode, Json<serde_json::Value>);

fn bad_request(message: &str) -> ErrorResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
}

/// POST /api/sales/import (manager/admin, multipart)
///
/// Поля: `file` — сам файл ведомости, либо `fileToken` — имя файла,
/// оставшегося после dry-run; `dryRun` и `skipLadyDrinks` — флаги.
/// После dry-run файл сохраняется и его токен возвращается в ответе,
/// чтобы подтверждающий запрос не загружал файл заново; во всех
/// остальных случаях файл удаляется.
pub async fn import_sales(
    CurrentUser(claims): CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ErrorResponse> {
    let mut stored_file: Option<PathBuf> = None;
    let mut file_token: Option<String> = None;
    let mut dry_run = false;
    let mut skip_lady_drinks = false;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        bad_request("Malformed multipart request")
    })? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let original_name = field.file_name().unwrap_or("ledger.xlsx").to_string();
                let data = field.bytes().await.map_err(|e| {
                    tracing::error!("Failed to read uploaded file: {}", e);
                    bad_request("Failed to read uploaded file")
                })?;
                stored_file = Some(store_upload(&original_name, &data).map_err(|e| {
                    tracing::error!("Failed to store uploaded file: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(serde_json::json!({ "error": "Failed to store uploaded file" })),
                    )
                })?);
            }
            "fileToken" => {
                let token = field.text().await.unwrap_or_default();
                file_token = Some(token);
            }
            "dryRun" => {
                dry_run = parse_flag(&field.text().await.unwrap_or_default());
            }
            "skipLadyDrinks" => {
                skip_lady_drinks = parse_flag(&field.text().await.unwrap_or_default());
            }
            other => {
                tracing::warn!("Ignoring unknown import field '{}'", other);
            }
        }
    }

    let path = match (stored_file, file_token) {
        (Some(path), _) => path,
        (None, Some(token)) => resolve_token(&token).map_err(|msg| bad_request(msg))?,
        (None, None) => return Err(bad_request("A file or fileToken is required")),
    };

    let options = ImportOptions {
        acting_user_id: Some(claims.sub.clone()),
        skip_lady_drinks,
        dry_run,
    };

    let run = import_sales::import_sales_from_file(&path, &options).await;

    // Файл dry-run остаётся для последующего подтверждения, иначе чистим
    if !dry_run {
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::warn!("Failed to remove upload {}: {}", path.display(), e);
        }
    }

    match run {
        Ok(result) => {
            log_activity(Some(&claims.sub), "import_sales", Some("import"), None).await;

            let mut body = serde_json::to_value(&result).map_err(|e| {
                tracing::error!("Failed to serialize import result: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "Failed to serialize import result" })),
                )
            })?;
            if dry_run {
                if let (Some(obj), Some(name)) =
                    (body.as_object_mut(), path.file_name().and_then(|n| n.to_str()))
                {
                    obj.insert(
                        "fileToken".to_string(),
                        serde_json::Value::String(name.to_string()),
                    );
                }
            }
            Ok(Json(body))
        }
        Err(e) => {
            tracing::error!("Import failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            ))
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim(), "true" | "1" | "on" | "yes")
}

/// Сохраняет загрузку под случайным именем, расширение берём из исходного
fn store_upload(original_name: &str, data: &[u8]) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(UPLOAD_DIR)?;

    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.len() <= 5 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or("xlsx");

    let path = Path::new(UPLOAD_DIR).join(format!("{}.{}", uuid::Uuid::new_v4(), extension));
    std::fs::write(&path, data)?;
    Ok(path)
}

/// Токен — это имя файла в каталоге загрузок; путей в нём быть не может
fn resolve_token(token: &str) -> Result<PathBuf, &'static str> {
    let valid = !token.is_empty()
        && !token.contains("..")
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if !valid {
        return Err("Invalid fileToken");
    }

    let path = Path::new(UPLOAD_DIR).join(token);
    if !path.exists() {
        return Err("Unknown fileToken");
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_resolve_token_rejects_paths() {
        assert!(resolve_token("../../etc/passwd").is_err());
        assert!(resolve_token("a/b.xlsx").is_err());
        assert!(resolve_token("").is_err());
    }
}
