use anyhow::Result;
use contracts::reports::ActivityLogEntry;
use sea_orm::{DatabaseBackend, FromQueryResult, Statement};

use crate::shared::data::db::get_connection;

/// Журнал действий, свежие записи первыми
pub async fn list_activity_logs(limit: u64, offset: u64) -> Result<Vec<ActivityLogEntry>> {
    #[derive(Debug, FromQueryResult)]
    struct Row {
        id: String,
        user_id: Option<String>,
        username: Option<String>,
        full_name: Option<String>,
        action: String,
        entity_type: Option<String>,
        entity_id: Option<String>,
        created_at: String,
    }

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "SELECT al.id, al.user_id, u.username, u.full_name, al.action, al.entity_type, al.entity_id, al.created_at
         FROM activity_logs al
         LEFT JOIN users u ON al.user_id = u.id
         ORDER BY al.created_at DESC
         LIMIT ? OFFSET ?",
        [limit.into(), offset.into()],
    );

    let rows = Row::find_by_statement(stmt).all(get_connection()).await?;

    Ok(rows
        .into_iter()
        .map(|r| ActivityLogEntry {
            id: r.id,
            user_id: r.user_id,
            username: r.username,
            full_name: r.full_name,
            action: r.action,
            entity_type: r.entity_type,
            entity_id: r.entity_id,
            created_at: r.created_at,
        })
        .collect())
}
