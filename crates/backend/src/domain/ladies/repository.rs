use anyhow::Result;
use chrono::Utc;
use contracts::domain::lady::Lady;
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

use crate::shared::data::db::get_connection;

fn lady_from_row(row: &QueryResult) -> Result<Lady> {
    Ok(Lady {
        id: row.try_get("", "id")?,
        name: row.try_get("", "name")?,
        is_active: row.try_get::<i32>("", "is_active")? != 0,
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
    })
}

pub async fn insert(name: &str) -> Result<String> {
    let db = get_connection();
    let id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO ladies (id, name, is_active, created_at, updated_at) VALUES (?, ?, 1, ?, ?)",
        [
            id.clone().into(),
            name.to_string().into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await?;

    Ok(id)
}

pub async fn list(include_inactive: bool) -> Result<Vec<Lady>> {
    let db = get_connection();

    let sql = if include_inactive {
        "SELECT id, name, is_active, created_at, updated_at FROM ladies ORDER BY name ASC"
    } else {
        "SELECT id, name, is_active, created_at, updated_at FROM ladies WHERE is_active = 1 ORDER BY name ASC"
    };

    let rows = db
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;

    let mut ladies = Vec::new();
    for row in rows {
        ladies.push(lady_from_row(&row)?);
    }
    Ok(ladies)
}

/// Активный состав; из него строится справочник имён при импорте
pub async fn list_active() -> Result<Vec<Lady>> {
    list(false).await
}

pub async fn get_by_id(id: &str) -> Result<Option<Lady>> {
    let db = get_connection();

    let result = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, name, is_active, created_at, updated_at FROM ladies WHERE id = ?",
            [id.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(lady_from_row(&row)?)),
        None => Ok(None),
    }
}

/// Поиск по имени без учёта регистра
pub async fn get_by_name(name: &str) -> Result<Option<Lady>> {
    let db = get_connection();

    let result = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, name, is_active, created_at, updated_at FROM ladies WHERE LOWER(name) = LOWER(?)",
            [name.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(lady_from_row(&row)?)),
        None => Ok(None),
    }
}

pub async fn update(lady: &Lady) -> Result<()> {
    let db = get_connection();

    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE ladies SET name = ?, is_active = ?, updated_at = ? WHERE id = ?",
        [
            lady.name.clone().into(),
            (if lady.is_active { 1 } else { 0 }).into(),
            Utc::now().to_rfc3339().into(),
            lady.id.clone().into(),
        ],
    ))
    .await?;

    Ok(())
}

/// Мягкое удаление: состав не чистим, история напитков остаётся
pub async fn deactivate(id: &str) -> Result<bool> {
    let db = get_connection();

    let result = db
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE ladies SET is_active = 0, updated_at = ? WHERE id = ?",
            [Utc::now().to_rfc3339().into(), id.into()],
        ))
        .await?;

    Ok(result.rows_affected() > 0)
}
