use std::path::Path;

use anyhow::Result;
use contracts::domain::import::{ImportOptions, RowDetail, RowWritten, RunResult, SaleRef};
use sea_orm::{DatabaseTransaction, TransactionTrait};

use super::directory::LadyDirectory;
use super::row::{self, RowError};
use super::workbook;
use crate::domain::lady_drinks;
use crate::domain::sales::repository::{self as sales_repository, NewSale};
use crate::shared::data::db::get_connection;
use crate::system::users::repository as users_repository;

/// Категория, под которой ложатся обе продажи строки
const IMPORT_SALE_CATEGORY: &str = "drinks";

/// Исход строки терминален: пропуск, ошибка или запись; повторов нет
#[derive(Debug, Clone)]
pub enum RowOutcome {
    Skipped,
    Failed { row: usize, error: RowError },
    Written(RowWritten),
}

/// Запускает конвейер импорта по файлу ведомости.
///
/// Вся запись идёт в одной транзакции на файл: либо фиксируются строки
/// всего файла, либо (при неожиданном сбое записи) ничего. Ошибки разбора
/// отдельных строк не откатывают транзакцию — такие строки просто ничего
/// не пишут. При `dry_run` проверки те же, но транзакция не открывается
/// и записей нет.
pub async fn import_sales_from_file(path: &Path, options: &ImportOptions) -> Result<RunResult> {
    let started_at = std::time::Instant::now();
    tracing::info!(
        "Starting ledger import from {} (dry_run={}, skip_lady_drinks={})",
        path.display(),
        options.dry_run,
        options.skip_lady_drinks
    );

    let rows = workbook::read_rows(path)?;
    tracing::info!("Found {} rows in sheet", rows.len());

    let directory = LadyDirectory::load().await?;
    let acting_user_id = resolve_acting_user(options.acting_user_id.clone()).await?;

    let mut outcomes: Vec<RowOutcome> = Vec::with_capacity(rows.len());

    if options.dry_run {
        for (index, cells) in rows.iter().enumerate().skip(1) {
            let outcome = process_row(
                None,
                index,
                cells,
                &directory,
                acting_user_id.as_deref(),
                options.skip_lady_drinks,
            )
            .await?;
            outcomes.push(outcome);
        }
        tracing::info!("[DRY RUN] No changes made to database");
    } else {
        let db = get_connection();
        let txn = db.begin().await?;

        let mut fatal: Option<anyhow::Error> = None;
        for (index, cells) in rows.iter().enumerate().skip(1) {
            match process_row(
                Some(&txn),
                index,
                cells,
                &directory,
                acting_user_id.as_deref(),
                options.skip_lady_drinks,
            )
            .await
            {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    fatal = Some(e);
                    break;
                }
            }
        }

        if let Some(e) = fatal {
            txn.rollback().await.ok();
            tracing::error!("Import failed, transaction rolled back: {}", e);
            return Err(e);
        }

        txn.commit().await?;
    }

    let result = collect_results(outcomes);
    tracing::info!(
        "Ledger import finished: success={}, errors={}, skipped={}, sales_created={}, lady_drinks_created={}, elapsed_ms={}",
        result.success,
        result.errors,
        result.skipped,
        result.sales_created,
        result.lady_drinks_created,
        started_at.elapsed().as_millis()
    );

    Ok(result)
}

/// Кому атрибутировать записи: явный пользователь, иначе любой активный
/// администратор; если таких нет — атрибуция остаётся пустой
async fn resolve_acting_user(explicit: Option<String>) -> Result<Option<String>> {
    if explicit.is_some() {
        return Ok(explicit);
    }
    Ok(users_repository::get_any_by_role("admin")
        .await?
        .map(|u| u.id))
}

/// Одна строка: разбор и разрешение имени всегда, запись — только при
/// открытой транзакции. `Err` означает сбой записи и откат всего файла.
async fn process_row(
    txn: Option<&DatabaseTransaction>,
    index: usize,
    cells: &[String],
    directory: &LadyDirectory,
    acting_user_id: Option<&str>,
    skip_lady_drinks: bool,
) -> Result<RowOutcome> {
    if row::is_blank(cells) {
        return Ok(RowOutcome::Skipped);
    }

    let row_no = index + 1;
    let parsed = match row::normalize(index, cells) {
        Ok(parsed) => parsed,
        Err(error) => {
            tracing::warn!("Error in row {}: {}", row_no, error);
            return Ok(RowOutcome::Failed { row: row_no, error });
        }
    };

    // Разрешение имени: без имени с положительным количеством записать
    // некому; имя без количества терпимо и остаётся неразрешённым
    let lady_id: Option<String> = match &parsed.lady_name {
        Some(name) => match directory.resolve(name) {
            Some(id) => Some(id.to_string()),
            None if parsed.quantity > 0 => {
                let error = RowError::UnknownLady {
                    name: name.clone(),
                    known: directory.known_names(),
                };
                tracing::warn!("Error in row {}: {}", row_no, error);
                return Ok(RowOutcome::Failed { row: row_no, error });
            }
            None => None,
        },
        None if parsed.quantity > 0 => {
            let error = RowError::MissingLadyName {
                known: directory.known_names(),
            };
            tracing::warn!("Error in row {}: {}", row_no, error);
            return Ok(RowOutcome::Failed { row: row_no, error });
        }
        None => None,
    };

    let mut sales_ids: Vec<SaleRef> = Vec::new();
    let mut lady_drink_id: Option<String> = None;

    match txn {
        Some(txn) => {
            if parsed.cash > 0.0 {
                let id = sales_repository::insert_txn(
                    txn,
                    &NewSale {
                        date: parsed.date.clone(),
                        amount: parsed.cash,
                        payment_method: "cash".to_string(),
                        category: IMPORT_SALE_CATEGORY.to_string(),
                        notes: None,
                        created_by: acting_user_id.map(|s| s.to_string()),
                    },
                )
                .await?;
                sales_ids.push(SaleRef {
                    kind: "cash".to_string(),
                    id,
                });
            }

            if parsed.transfer > 0.0 {
                let id = sales_repository::insert_txn(
                    txn,
                    &NewSale {
                        date: parsed.date.clone(),
                        amount: parsed.transfer,
                        payment_method: "transfer".to_string(),
                        category: IMPORT_SALE_CATEGORY.to_string(),
                        notes: None,
                        created_by: acting_user_id.map(|s| s.to_string()),
                    },
                )
                .await?;
                sales_ids.push(SaleRef {
                    kind: "transfer".to_string(),
                    id,
                });
            }

            if parsed.quantity > 0 && !skip_lady_drinks {
                if let Some(ref lady_id) = lady_id {
                    let id = lady_drinks::repository::upsert_accumulate_txn(
                        txn,
                        &parsed.date,
                        lady_id,
                        parsed.quantity,
                        acting_user_id,
                    )
                    .await?;
                    lady_drink_id = Some(id);
                }
            }
        }
        None => {
            if parsed.cash > 0.0 {
                tracing::info!(
                    "[DRY RUN] Would create cash sale: {} - {}",
                    parsed.date,
                    parsed.cash
                );
            }
            if parsed.transfer > 0.0 {
                tracing::info!(
                    "[DRY RUN] Would create transfer sale: {} - {}",
                    parsed.date,
                    parsed.transfer
                );
            }
            if parsed.quantity > 0 && lady_id.is_some() && !skip_lady_drinks {
                tracing::info!(
                    "[DRY RUN] Would record {} drinks for {} on {}",
                    parsed.quantity,
                    parsed.lady_name.as_deref().unwrap_or(""),
                    parsed.date
                );
            }
        }
    }

    Ok(RowOutcome::Written(RowWritten {
        row: row_no,
        date: parsed.date,
        cash: parsed.cash,
        transfer: parsed.transfer,
        lady_name: parsed.lady_name,
        quantity: parsed.quantity,
        sales_ids,
        lady_drink_id,
    }))
}

/// Сводит исходы строк в итоговый отчёт; порядок `details` — порядок файла
fn collect_results(outcomes: Vec<RowOutcome>) -> RunResult {
    let mut result = RunResult::default();

    for outcome in outcomes {
        match outcome {
            RowOutcome::Skipped => result.skipped += 1,
            RowOutcome::Failed { row, error } => {
                result.errors += 1;
                result.details.push(RowDetail::Failed {
                    row,
                    error: error.to_string(),
                });
            }
            RowOutcome::Written(written) => {
                result.success += 1;
                result.sales_created += written.sales_ids.len();
                if written.lady_drink_id.is_some() {
                    result.lady_drinks_created += 1;
                }
                result.details.push(RowDetail::Written(written));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(row: usize, sales: usize, drink: bool) -> RowOutcome {
        RowOutcome::Written(RowWritten {
            row,
            date: "2024-11-03".to_string(),
            cash: 100.0,
            transfer: 0.0,
            lady_name: None,
            quantity: 0,
            sales_ids: (0..sales)
                .map(|i| SaleRef {
                    kind: "cash".to_string(),
                    id: format!("id-{}", i),
                })
                .collect(),
            lady_drink_id: if drink { Some("d-1".to_string()) } else { None },
        })
    }

    #[test]
    fn test_counters_are_derived_from_outcomes() {
        let outcomes = vec![
            written(2, 2, true),
            RowOutcome::Skipped,
            RowOutcome::Failed {
                row: 4,
                error: RowError::InvalidDate("huh".to_string()),
            },
            written(5, 0, false),
        ];

        let result = collect_results(outcomes);
        assert_eq!(result.success, 2);
        assert_eq!(result.errors, 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.sales_created, 2);
        assert_eq!(result.lady_drinks_created, 1);
        assert_eq!(result.details.len(), 3);
    }

    #[test]
    fn test_zero_write_rows_still_count_as_success() {
        let result = collect_results(vec![written(2, 0, false)]);
        assert_eq!(result.success, 1);
        assert_eq!(result.sales_created, 0);
        assert_eq!(result.lady_drinks_created, 0);
    }

    #[test]
    fn test_details_keep_file_order() {
        let result = collect_results(vec![
            RowOutcome::Failed {
                row: 2,
                error: RowError::MissingDate,
            },
            written(3, 1, false),
        ]);

        match &result.details[0] {
            RowDetail::Failed { row, .. } => assert_eq!(*row, 2),
            _ => panic!("expected failed detail first"),
        }
        match &result.details[1] {
            RowDetail::Written(w) => assert_eq!(w.row, 3),
            _ => panic!("expected written detail second"),
        }
    }
}
