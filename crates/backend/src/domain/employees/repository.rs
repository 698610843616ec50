use anyhow::Result;
use chrono::Utc;
use contracts::domain::employee::Employee;
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

use crate::shared::data::db::get_connection;

fn employee_from_row(row: &QueryResult) -> Result<Employee> {
    Ok(Employee {
        id: row.try_get("", "id")?,
        name: row.try_get("", "name")?,
        position: row.try_get("", "position")?,
        is_active: row.try_get::<i32>("", "is_active")? != 0,
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
    })
}

pub async fn insert(name: &str, position: Option<&str>) -> Result<String> {
    let db = get_connection();
    let id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO employees (id, name, position, is_active, created_at, updated_at)
         VALUES (?, ?, ?, 1, ?, ?)",
        [
            id.clone().into(),
            name.to_string().into(),
            position.map(|s| s.to_string()).into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await?;

    Ok(id)
}

pub async fn list(include_inactive: bool) -> Result<Vec<Employee>> {
    let db = get_connection();

    let sql = if include_inactive {
        "SELECT id, name, position, is_active, created_at, updated_at FROM employees ORDER BY name ASC"
    } else {
        "SELECT id, name, position, is_active, created_at, updated_at FROM employees WHERE is_active = 1 ORDER BY name ASC"
    };

    let rows = db
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;

    let mut employees = Vec::new();
    for row in rows {
        employees.push(employee_from_row(&row)?);
    }
    Ok(employees)
}

pub async fn get_by_id(id: &str) -> Result<Option<Employee>> {
    let db = get_connection();

    let result = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, name, position, is_active, created_at, updated_at FROM employees WHERE id = ?",
            [id.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(employee_from_row(&row)?)),
        None => Ok(None),
    }
}

pub async fn update(employee: &Employee) -> Result<()> {
    let db = get_connection();

    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE employees SET name = ?, position = ?, is_active = ?, updated_at = ? WHERE id = ?",
        [
            employee.name.clone().into(),
            employee.position.clone().into(),
            (if employee.is_active { 1 } else { 0 }).into(),
            Utc::now().to_rfc3339().into(),
            employee.id.clone().into(),
        ],
    ))
    .await?;

    Ok(())
}

pub async fn deactivate(id: &str) -> Result<bool> {
    let db = get_connection();

    let result = db
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE employees SET is_active = 0, updated_at = ? WHERE id = ?",
            [Utc::now().to_rfc3339().into(), id.into()],
        ))
        .await?;

    Ok(result.rows_affected() > 0)
}
