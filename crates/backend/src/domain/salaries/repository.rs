use anyhow::Result;
use chrono::Utc;
use contracts::domain::salary::{SalariesSummary, Salary};
use sea_orm::{ConnectionTrait, DatabaseBackend, FromQueryResult, QueryResult, Statement};

use crate::shared::data::db::get_connection;

const SALARY_COLUMNS: &str = "s.id, s.date, s.amount, s.employee_id, e.name AS employee_name, s.position, s.notes, s.created_by, u.full_name AS created_by_name, s.created_at, s.updated_at";

#[derive(Debug, Clone)]
pub struct NewSalary {
    pub date: String,
    pub amount: f64,
    pub employee_id: Option<String>,
    pub position: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
}

fn salary_from_row(row: &QueryResult) -> Result<Salary> {
    Ok(Salary {
        id: row.try_get("", "id")?,
        date: row.try_get("", "date")?,
        amount: row.try_get("", "amount")?,
        employee_id: row.try_get("", "employee_id")?,
        employee_name: row.try_get("", "employee_name").ok(),
        position: row.try_get("", "position")?,
        notes: row.try_get("", "notes")?,
        created_by: row.try_get("", "created_by")?,
        created_by_name: row.try_get("", "created_by_name").ok(),
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
    })
}

pub async fn insert(new: &NewSalary) -> Result<String> {
    let db = get_connection();
    let id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO salaries (id, date, amount, employee_id, position, notes, created_by, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        [
            id.clone().into(),
            new.date.clone().into(),
            new.amount.into(),
            new.employee_id.clone().into(),
            new.position.clone().into(),
            new.notes.clone().into(),
            new.created_by.clone().into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await?;

    Ok(id)
}

pub async fn list(start_date: Option<&str>, end_date: Option<&str>) -> Result<Vec<Salary>> {
    let db = get_connection();

    let mut sql = format!(
        "SELECT {} FROM salaries s
         LEFT JOIN employees e ON s.employee_id = e.id
         LEFT JOIN users u ON s.created_by = u.id
         WHERE 1=1",
        SALARY_COLUMNS
    );
    let mut values: Vec<sea_orm::Value> = Vec::new();

    if let Some(start) = start_date {
        sql.push_str(" AND s.date >= ?");
        values.push(start.into());
    }
    if let Some(end) = end_date {
        sql.push_str(" AND s.date <= ?");
        values.push(end.into());
    }

    sql.push_str(" ORDER BY s.date DESC, s.created_at DESC");

    let rows = db
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &sql,
            values,
        ))
        .await?;

    let mut salaries = Vec::new();
    for row in rows {
        salaries.push(salary_from_row(&row)?);
    }
    Ok(salaries)
}

pub async fn get_by_id(id: &str) -> Result<Option<Salary>> {
    let db = get_connection();

    let result = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "SELECT {} FROM salaries s
                 LEFT JOIN employees e ON s.employee_id = e.id
                 LEFT JOIN users u ON s.created_by = u.id
                 WHERE s.id = ?",
                SALARY_COLUMNS
            ),
            [id.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(salary_from_row(&row)?)),
        None => Ok(None),
    }
}

pub async fn update(salary: &Salary) -> Result<()> {
    let db = get_connection();

    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE salaries SET amount = ?, notes = ?, updated_at = ? WHERE id = ?",
        [
            salary.amount.into(),
            salary.notes.clone().into(),
            Utc::now().to_rfc3339().into(),
            salary.id.clone().into(),
        ],
    ))
    .await?;

    Ok(())
}

pub async fn delete(id: &str) -> Result<bool> {
    let db = get_connection();

    let result = db
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "DELETE FROM salaries WHERE id = ?",
            [id.into()],
        ))
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_summary(start_date: &str, end_date: &str) -> Result<SalariesSummary> {
    #[derive(Debug, FromQueryResult)]
    struct Row {
        total_count: i64,
        total_amount: Option<f64>,
        average_amount: Option<f64>,
    }

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "SELECT
            COUNT(*) AS total_count,
            SUM(amount) AS total_amount,
            AVG(amount) AS average_amount
         FROM salaries
         WHERE date >= ? AND date <= ?",
        [start_date.into(), end_date.into()],
    );

    let row = Row::find_by_statement(stmt)
        .one(get_connection())
        .await?
        .ok_or_else(|| anyhow::anyhow!("Summary query returned no row"))?;

    Ok(SalariesSummary {
        total_count: row.total_count,
        total_amount: row.total_amount.unwrap_or(0.0),
        average_amount: row.average_amount.unwrap_or(0.0),
    })
}
