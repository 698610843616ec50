use anyhow::Result;
use chrono::Utc;
use contracts::domain::lady::{LadyDrink, LadyDrinksSummary};
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseTransaction, FromQueryResult, QueryResult, Statement,
};

use crate::shared::data::db::get_connection;

const DRINK_COLUMNS: &str = "ld.id, ld.date, ld.lady_id, l.name AS lady_name, ld.drink_count, ld.created_by, ld.created_at, ld.updated_at";

fn drink_from_row(row: &QueryResult) -> Result<LadyDrink> {
    Ok(LadyDrink {
        id: row.try_get("", "id")?,
        date: row.try_get("", "date")?,
        lady_id: row.try_get("", "lady_id")?,
        lady_name: row.try_get("", "lady_name").ok(),
        drink_count: row.try_get("", "drink_count")?,
        created_by: row.try_get("", "created_by")?,
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
    })
}

/// Импортный upsert: при конфликте (date, lady_id) количество ДОБАВЛЯЕТСЯ
/// к уже записанному, а не заменяет его. Интерактивное сохранение за день
/// работает иначе (см. `replace_for_date`).
pub async fn upsert_accumulate_txn(
    txn: &DatabaseTransaction,
    date: &str,
    lady_id: &str,
    drink_count: i64,
    created_by: Option<&str>,
) -> Result<String> {
    let existing = txn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, drink_count FROM lady_drinks WHERE date = ? AND lady_id = ?",
            [date.into(), lady_id.into()],
        ))
        .await?;

    if let Some(row) = existing {
        let id: String = row.try_get("", "id")?;
        let current: i64 = row.try_get("", "drink_count")?;

        txn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE lady_drinks SET drink_count = ?, updated_at = ? WHERE id = ?",
            [
                (current + drink_count).into(),
                Utc::now().to_rfc3339().into(),
                id.clone().into(),
            ],
        ))
        .await?;

        Ok(id)
    } else {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        txn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO lady_drinks (id, date, lady_id, drink_count, created_by, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            [
                id.clone().into(),
                date.into(),
                lady_id.into(),
                drink_count.into(),
                created_by.map(|s| s.to_string()).into(),
                now.clone().into(),
                now.into(),
            ],
        ))
        .await?;

        Ok(id)
    }
}

/// Интерактивное сохранение за день: полная замена — стираем все записи даты
/// и вставляем заново только ненулевые позиции. Одна транзакция.
pub async fn replace_for_date(
    date: &str,
    entries: &[(String, i64)],
    created_by: Option<&str>,
) -> Result<Vec<String>> {
    use sea_orm::TransactionTrait;

    let db = get_connection();
    let txn = db.begin().await?;

    txn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "DELETE FROM lady_drinks WHERE date = ?",
        [date.into()],
    ))
    .await?;

    let mut ids = Vec::new();
    for (lady_id, drink_count) in entries {
        if *drink_count <= 0 {
            continue;
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        txn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO lady_drinks (id, date, lady_id, drink_count, created_by, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            [
                id.clone().into(),
                date.into(),
                lady_id.clone().into(),
                (*drink_count).into(),
                created_by.map(|s| s.to_string()).into(),
                now.clone().into(),
                now.into(),
            ],
        ))
        .await?;

        ids.push(id);
    }

    txn.commit().await?;
    Ok(ids)
}

pub async fn get_by_date(date: &str) -> Result<Vec<LadyDrink>> {
    let db = get_connection();

    let rows = db
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "SELECT {} FROM lady_drinks ld JOIN ladies l ON ld.lady_id = l.id
                 WHERE ld.date = ? ORDER BY l.name ASC",
                DRINK_COLUMNS
            ),
            [date.into()],
        ))
        .await?;

    let mut drinks = Vec::new();
    for row in rows {
        drinks.push(drink_from_row(&row)?);
    }
    Ok(drinks)
}

pub async fn get_by_date_range(start_date: &str, end_date: &str) -> Result<Vec<LadyDrink>> {
    let db = get_connection();

    let rows = db
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "SELECT {} FROM lady_drinks ld JOIN ladies l ON ld.lady_id = l.id
                 WHERE ld.date >= ? AND ld.date <= ?
                 ORDER BY ld.date DESC, l.name ASC",
                DRINK_COLUMNS
            ),
            [start_date.into(), end_date.into()],
        ))
        .await?;

    let mut drinks = Vec::new();
    for row in rows {
        drinks.push(drink_from_row(&row)?);
    }
    Ok(drinks)
}

/// Итоги по активным сотрудницам за период
pub async fn get_summary(start_date: &str, end_date: &str) -> Result<Vec<LadyDrinksSummary>> {
    #[derive(Debug, FromQueryResult)]
    struct Row {
        lady_id: String,
        lady_name: String,
        total_drinks: Option<i64>,
        days_worked: i64,
    }

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "SELECT
            l.id AS lady_id,
            l.name AS lady_name,
            SUM(ld.drink_count) AS total_drinks,
            COUNT(DISTINCT ld.date) AS days_worked
         FROM ladies l
         LEFT JOIN lady_drinks ld ON l.id = ld.lady_id AND ld.date >= ? AND ld.date <= ?
         WHERE l.is_active = 1
         GROUP BY l.id, l.name
         ORDER BY total_drinks DESC, l.name ASC",
        [start_date.into(), end_date.into()],
    );

    let rows = Row::find_by_statement(stmt).all(get_connection()).await?;

    Ok(rows
        .into_iter()
        .map(|r| LadyDrinksSummary {
            lady_id: r.lady_id,
            lady_name: r.lady_name,
            total_drinks: r.total_drinks.unwrap_or(0),
            days_worked: r.days_worked,
        })
        .collect())
}
