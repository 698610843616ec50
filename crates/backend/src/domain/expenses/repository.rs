use anyhow::Result;
use chrono::Utc;
use contracts::domain::expense::{Expense, ExpensesSummary};
use contracts::domain::sale::{CategoryTotal, DailyTotal};
use sea_orm::{ConnectionTrait, DatabaseBackend, FromQueryResult, QueryResult, Statement};

use crate::shared::data::db::get_connection;

const EXPENSE_COLUMNS: &str = "e.id, e.date, e.amount, e.category, e.description, e.receipt_url, e.created_by, u.full_name AS created_by_name, e.created_at, e.updated_at";

#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub receipt_url: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseFilters {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
}

fn expense_from_row(row: &QueryResult) -> Result<Expense> {
    Ok(Expense {
        id: row.try_get("", "id")?,
        date: row.try_get("", "date")?,
        amount: row.try_get("", "amount")?,
        category: row.try_get("", "category")?,
        description: row.try_get("", "description")?,
        receipt_url: row.try_get("", "receipt_url")?,
        created_by: row.try_get("", "created_by")?,
        created_by_name: row.try_get("", "created_by_name").ok(),
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
    })
}

pub async fn insert(new: &NewExpense) -> Result<String> {
    let db = get_connection();
    let id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO expenses (id, date, amount, category, description, receipt_url, created_by, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        [
            id.clone().into(),
            new.date.clone().into(),
            new.amount.into(),
            new.category.clone().into(),
            new.description.clone().into(),
            new.receipt_url.clone().into(),
            new.created_by.clone().into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await?;

    Ok(id)
}

pub async fn list(filters: &ExpenseFilters) -> Result<Vec<Expense>> {
    let db = get_connection();

    let mut sql = format!(
        "SELECT {} FROM expenses e LEFT JOIN users u ON e.created_by = u.id WHERE 1=1",
        EXPENSE_COLUMNS
    );
    let mut values: Vec<sea_orm::Value> = Vec::new();

    if let Some(ref start) = filters.start_date {
        sql.push_str(" AND e.date >= ?");
        values.push(start.clone().into());
    }
    if let Some(ref end) = filters.end_date {
        sql.push_str(" AND e.date <= ?");
        values.push(end.clone().into());
    }
    if let Some(ref category) = filters.category {
        sql.push_str(" AND e.category = ?");
        values.push(category.clone().into());
    }

    sql.push_str(" ORDER BY e.date DESC, e.created_at DESC");

    let rows = db
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &sql,
            values,
        ))
        .await?;

    let mut expenses = Vec::new();
    for row in rows {
        expenses.push(expense_from_row(&row)?);
    }
    Ok(expenses)
}

pub async fn get_by_id(id: &str) -> Result<Option<Expense>> {
    let db = get_connection();

    let result = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "SELECT {} FROM expenses e LEFT JOIN users u ON e.created_by = u.id WHERE e.id = ?",
                EXPENSE_COLUMNS
            ),
            [id.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(expense_from_row(&row)?)),
        None => Ok(None),
    }
}

pub async fn update(expense: &Expense) -> Result<()> {
    let db = get_connection();

    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE expenses SET amount = ?, category = ?, description = ?, receipt_url = ?, updated_at = ?
         WHERE id = ?",
        [
            expense.amount.into(),
            expense.category.clone().into(),
            expense.description.clone().into(),
            expense.receipt_url.clone().into(),
            Utc::now().to_rfc3339().into(),
            expense.id.clone().into(),
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
            "DELETE FROM expenses WHERE id = ?",
            [id.into()],
        ))
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_summary(start_date: &str, end_date: &str) -> Result<ExpensesSummary> {
    #[derive(Debug, FromQueryResult)]
    struct Row {
        total_transactions: i64,
        total_expenses: Option<f64>,
        average_expense: Option<f64>,
        highest_expense: Option<f64>,
        lowest_expense: Option<f64>,
        days_with_expenses: i64,
    }

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "SELECT
            COUNT(*) AS total_transactions,
            SUM(amount) AS total_expenses,
            AVG(amount) AS average_expense,
            MAX(amount) AS highest_expense,
            MIN(amount) AS lowest_expense,
            COUNT(DISTINCT date) AS days_with_expenses
         FROM expenses
         WHERE date >= ? AND date <= ?",
        [start_date.into(), end_date.into()],
    );

    let row = Row::find_by_statement(stmt)
        .one(get_connection())
        .await?
        .ok_or_else(|| anyhow::anyhow!("Summary query returned no row"))?;

    Ok(ExpensesSummary {
        total_transactions: row.total_transactions,
        total_expenses: row.total_expenses.unwrap_or(0.0),
        average_expense: row.average_expense.unwrap_or(0.0),
        highest_expense: row.highest_expense.unwrap_or(0.0),
        lowest_expense: row.lowest_expense.unwrap_or(0.0),
        days_with_expenses: row.days_with_expenses,
    })
}

pub async fn get_by_category(start_date: &str, end_date: &str) -> Result<Vec<CategoryTotal>> {
    #[derive(Debug, FromQueryResult)]
    struct Row {
        category: String,
        count: i64,
        total: f64,
    }

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "SELECT category, COUNT(*) AS count, SUM(amount) AS total
         FROM expenses
         WHERE date >= ? AND date <= ?
         GROUP BY category
         ORDER BY total DESC",
        [start_date.into(), end_date.into()],
    );

    let rows = Row::find_by_statement(stmt).all(get_connection()).await?;

    Ok(rows
        .into_iter()
        .map(|r| CategoryTotal {
            category: r.category,
            count: r.count,
            total: r.total,
        })
        .collect())
}

pub async fn get_daily(start_date: &str, end_date: &str) -> Result<Vec<DailyTotal>> {
    #[derive(Debug, FromQueryResult)]
    struct Row {
        date: String,
        transactions: i64,
        total: f64,
    }

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "SELECT date, COUNT(*) AS transactions, SUM(amount) AS total
         FROM expenses
         WHERE date >= ? AND date <= ?
         GROUP BY date
         ORDER BY date",
        [start_date.into(), end_date.into()],
    );

    let rows = Row::find_by_statement(stmt).all(get_connection()).await?;

    Ok(rows
        .into_iter()
        .map(|r| DailyTotal {
            date: r.date,
            transactions: r.transactions,
            total: r.total,
        })
        .collect())
}
