use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::data::db::get_connection;

/// Записывает действие пользователя в журнал.
/// Сбой записи не должен ломать основной запрос, поэтому ошибки только логируются.
pub async fn log_activity(
    user_id: Option<&str>,
    action: &str,
    entity_type: Option<&str>,
    entity_id: Option<&str>,
) {
    let conn = get_connection();
    let now = chrono::Utc::now().to_rfc3339();

    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO activity_logs (id, user_id, action, entity_type, entity_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            [
                uuid::Uuid::new_v4().to_string().into(),
                user_id.map(|s| s.to_string()).into(),
                action.to_string().into(),
                entity_type.map(|s| s.to_string()).into(),
                entity_id.map(|s| s.to_string()).into(),
                now.into(),
            ],
        ))
        .await;

    if let Err(e) = result {
        tracing::warn!("Failed to write activity log entry '{}': {}", action, e);
    }
}
