use anyhow::Result;
use chrono::Utc;
use contracts::domain::sale::{
    CategoryTotal, DailyTotal, PaymentMethodTotal, Sale, SalesSummary,
};
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseTransaction, FromQueryResult, QueryResult, Statement,
};

use crate::shared::data::db::get_connection;

const SALE_COLUMNS: &str = "s.id, s.date, s.amount, s.payment_method, s.category, s.notes, s.created_by, u.full_name AS created_by_name, s.created_at, s.updated_at";

/// Поля новой продажи; id и отметки времени проставляет репозиторий
#[derive(Debug, Clone)]
pub struct NewSale {
    pub date: String,
    pub amount: f64,
    pub payment_method: String,
    pub category: String,
    pub notes: Option<String>,
    pub created_by: Option<String>,
}

/// Фильтры списка продаж
#[derive(Debug, Clone, Default)]
pub struct SaleFilters {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
}

fn sale_from_row(row: &QueryResult) -> Result<Sale> {
    Ok(Sale {
        id: row.try_get("", "id")?,
        date: row.try_get("", "date")?,
        amount: row.try_get("", "amount")?,
        payment_method: row.try_get("", "payment_method")?,
        category: row.try_get("", "category")?,
        notes: row.try_get("", "notes")?,
        created_by: row.try_get("", "created_by")?,
        created_by_name: row.try_get("", "created_by_name").ok(),
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
    })
}

/// Вставка продажи вне транзакции (интерактивный путь)
pub async fn insert(new: &NewSale) -> Result<String> {
    insert_on(get_connection(), new).await
}

/// Вставка продажи внутри транзакции импорта
pub async fn insert_txn(txn: &DatabaseTransaction, new: &NewSale) -> Result<String> {
    insert_on(txn, new).await
}

async fn insert_on<C: ConnectionTrait>(conn: &C, new: &NewSale) -> Result<String> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sales (id, date, amount, payment_method, category, notes, created_by, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        [
            id.clone().into(),
            new.date.clone().into(),
            new.amount.into(),
            new.payment_method.clone().into(),
            new.category.clone().into(),
            new.notes.clone().into(),
            new.created_by.clone().into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await?;

    Ok(id)
}

/// Список с фильтрами по периоду, категории и способу оплаты
pub async fn list(filters: &SaleFilters) -> Result<Vec<Sale>> {
    let db = get_connection();

    let mut sql = format!(
        "SELECT {} FROM sales s LEFT JOIN users u ON s.created_by = u.id WHERE 1=1",
        SALE_COLUMNS
    );
    let mut values: Vec<sea_orm::Value> = Vec::new();

    if let Some(ref start) = filters.start_date {
        sql.push_str(" AND s.date >= ?");
        values.push(start.clone().into());
    }
    if let Some(ref end) = filters.end_date {
        sql.push_str(" AND s.date <= ?");
        values.push(end.clone().into());
    }
    if let Some(ref category) = filters.category {
        sql.push_str(" AND s.category = ?");
        values.push(category.clone().into());
    }
    if let Some(ref method) = filters.payment_method {
        sql.push_str(" AND s.payment_method = ?");
        values.push(method.clone().into());
    }

    sql.push_str(" ORDER BY s.date DESC, s.created_at DESC");

    let rows = db
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &sql,
            values,
        ))
        .await?;

    let mut sales = Vec::new();
    for row in rows {
        sales.push(sale_from_row(&row)?);
    }
    Ok(sales)
}

pub async fn get_by_id(id: &str) -> Result<Option<Sale>> {
    let db = get_connection();

    let result = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "SELECT {} FROM sales s LEFT JOIN users u ON s.created_by = u.id WHERE s.id = ?",
                SALE_COLUMNS
            ),
            [id.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(sale_from_row(&row)?)),
        None => Ok(None),
    }
}

/// Обновление: читаем строку, накладываем изменённые поля, пишем целиком
pub async fn update(sale: &Sale) -> Result<()> {
    let db = get_connection();

    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sales SET date = ?, amount = ?, payment_method = ?, category = ?, notes = ?, updated_at = ?
         WHERE id = ?",
        [
            sale.date.clone().into(),
            sale.amount.into(),
            sale.payment_method.clone().into(),
            sale.category.clone().into(),
            sale.notes.clone().into(),
            Utc::now().to_rfc3339().into(),
            sale.id.clone().into(),
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
            "DELETE FROM sales WHERE id = ?",
            [id.into()],
        ))
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Сводка за период
pub async fn get_summary(start_date: &str, end_date: &str) -> Result<SalesSummary> {
    #[derive(Debug, FromQueryResult)]
    struct Row {
        total_transactions: i64,
        total_sales: Option<f64>,
        average_sale: Option<f64>,
        highest_sale: Option<f64>,
        lowest_sale: Option<f64>,
        days_with_sales: i64,
    }

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "SELECT
            COUNT(*) AS total_transactions,
            SUM(amount) AS total_sales,
            AVG(amount) AS average_sale,
            MAX(amount) AS highest_sale,
            MIN(amount) AS lowest_sale,
            COUNT(DISTINCT date) AS days_with_sales
         FROM sales
         WHERE date >= ? AND date <= ?",
        [start_date.into(), end_date.into()],
    );

    let row = Row::find_by_statement(stmt)
        .one(get_connection())
        .await?
        .ok_or_else(|| anyhow::anyhow!("Summary query returned no row"))?;

    Ok(SalesSummary {
        total_transactions: row.total_transactions,
        total_sales: row.total_sales.unwrap_or(0.0),
        average_sale: row.average_sale.unwrap_or(0.0),
        highest_sale: row.highest_sale.unwrap_or(0.0),
        lowest_sale: row.lowest_sale.unwrap_or(0.0),
        days_with_sales: row.days_with_sales,
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
         FROM sales
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

pub async fn get_by_payment_method(
    start_date: &str,
    end_date: &str,
) -> Result<Vec<PaymentMethodTotal>> {
    #[derive(Debug, FromQueryResult)]
    struct Row {
        payment_method: String,
        count: i64,
        total: f64,
    }

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "SELECT payment_method, COUNT(*) AS count, SUM(amount) AS total
         FROM sales
         WHERE date >= ? AND date <= ?
         GROUP BY payment_method
         ORDER BY total DESC",
        [start_date.into(), end_date.into()],
    );

    let rows = Row::find_by_statement(stmt).all(get_connection()).await?;

    Ok(rows
        .into_iter()
        .map(|r| PaymentMethodTotal {
            payment_method: r.payment_method,
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
         FROM sales
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
