//! End-to-end pipeline tests over a temporary sqlite database.
//!
//! The database connection is process-global, so everything runs inside a
//! single test body with one runtime.

use std::path::{Path, PathBuf};

use contracts::domain::import::{ImportOptions, RowDetail};
use contracts::domain::lady::{CreateLadyDto, LadyDrinkEntryDto, SaveLadyDrinksDto};
use contracts::system::users::CreateUserDto;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use backend::domain::{ladies, lady_drinks, sales};
use backend::shared::data::db;
use backend::system::users;
use backend::usecases::import_sales::{import_sales_from_file, ImportError};

fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

async fn sales_count() -> usize {
    sales::repository::list(&Default::default())
        .await
        .unwrap()
        .len()
}

async fn drink_count_for(date: &str, lady_name: &str) -> Option<i64> {
    lady_drinks::repository::get_by_date(date)
        .await
        .unwrap()
        .into_iter()
        .find(|d| d.lady_name.as_deref() == Some(lady_name))
        .map(|d| d.drink_count)
}

#[tokio::test]
async fn import_pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    db::initialize_database(db_path.to_str()).await.unwrap();

    // Seed: one admin for attribution, two active ladies for resolution
    let admin_id = users::service::create(
        CreateUserDto {
            username: "admin".to_string(),
            password: "admin".to_string(),
            email: None,
            full_name: None,
            role: "admin".to_string(),
        },
        None,
    )
    .await
    .unwrap();

    ladies::service::create(CreateLadyDto {
        name: "Ice".to_string(),
    })
    .await
    .unwrap();
    let kiki = ladies::service::create(CreateLadyDto {
        name: "Kiki".to_string(),
    })
    .await
    .unwrap();

    // Заголовок — первая строка листа; 45599 дней от эпохи = 2024-11-03
    let ledger = "\
Date,Cash,Transfer,Lady,Drinks
2024-11-03,1500,2000,Ice,2
not-a-date,100,0,,0
45599,0,500,kiki,1
,,,,
2024-11-04,0,0,,0
2024-11-05,0,0,Peachy,3
2024-11-05,0,0,,5
";
    let path = write_csv(dir.path(), "ledger.csv", ledger);

    // --- Dry run: identical validation, zero writes, idempotent ---
    let dry_options = ImportOptions {
        acting_user_id: None,
        skip_lady_drinks: false,
        dry_run: true,
    };
    let first_dry = import_sales_from_file(&path, &dry_options).await.unwrap();
    let second_dry = import_sales_from_file(&path, &dry_options).await.unwrap();

    assert_eq!(first_dry, second_dry);
    assert_eq!(first_dry.success, 3);
    assert_eq!(first_dry.errors, 3);
    assert_eq!(first_dry.skipped, 1);
    assert_eq!(first_dry.sales_created, 0);
    assert_eq!(first_dry.lady_drinks_created, 0);
    assert_eq!(sales_count().await, 0);
    assert!(lady_drinks::repository::get_by_date("2024-11-03")
        .await
        .unwrap()
        .is_empty());

    // --- Commit run: row isolation, header skip, serial dates ---
    let options = ImportOptions {
        acting_user_id: None,
        skip_lady_drinks: false,
        dry_run: false,
    };
    let result = import_sales_from_file(&path, &options).await.unwrap();

    assert_eq!(result.success, 3);
    assert_eq!(result.errors, 3);
    assert_eq!(result.skipped, 1);
    assert_eq!(result.sales_created, 3);
    assert_eq!(result.lady_drinks_created, 2);
    assert_eq!(sales_count().await, 3);

    // Порядковая дата попала в тот же календарный день, имя — без регистра
    assert_eq!(drink_count_for("2024-11-03", "Ice").await, Some(2));
    assert_eq!(drink_count_for("2024-11-03", "Kiki").await, Some(1));

    // Атрибуция: явного пользователя не было — взят администратор
    let all_sales = sales::repository::list(&Default::default()).await.unwrap();
    assert!(all_sales
        .iter()
        .all(|s| s.created_by.as_deref() == Some(admin_id.as_str())));

    // Ошибка о неизвестном имени перечисляет известные
    let unknown_error = result
        .details
        .iter()
        .find_map(|d| match d {
            RowDetail::Failed { row: 7, error } => Some(error.clone()),
            _ => None,
        })
        .expect("row 7 should fail");
    assert!(unknown_error.contains("Peachy"));
    assert!(unknown_error.contains("Ice"));
    assert!(unknown_error.contains("Kiki"));

    // Строка без имени, но с количеством — тоже ошибка строки
    assert!(result
        .details
        .iter()
        .any(|d| matches!(d, RowDetail::Failed { row: 8, .. })));

    // --- Accumulate-on-conflict across two runs ---
    let top_up = write_csv(
        dir.path(),
        "top_up.csv",
        "Date,Cash,Transfer,Lady,Drinks\n2024-11-03,0,0,Ice,5\n",
    );
    let top_up_result = import_sales_from_file(&top_up, &options).await.unwrap();
    assert_eq!(top_up_result.success, 1);
    assert_eq!(top_up_result.lady_drinks_created, 1);
    assert_eq!(drink_count_for("2024-11-03", "Ice").await, Some(7));

    // --- skip_lady_drinks leaves tallies untouched but still writes sales ---
    let with_drinks = write_csv(
        dir.path(),
        "with_drinks.csv",
        "Date,Cash,Transfer,Lady,Drinks\n2024-11-06,900,0,Ice,4\n",
    );
    let skipped_result = import_sales_from_file(
        &with_drinks,
        &ImportOptions {
            acting_user_id: None,
            skip_lady_drinks: true,
            dry_run: false,
        },
    )
    .await
    .unwrap();
    assert_eq!(skipped_result.sales_created, 1);
    assert_eq!(skipped_result.lady_drinks_created, 0);
    assert_eq!(drink_count_for("2024-11-06", "Ice").await, None);

    // --- All-or-nothing: a write failure mid-file rolls everything back ---
    let conn = db::get_connection();
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "ALTER TABLE lady_drinks RENAME TO lady_drinks_hidden".to_string(),
    ))
    .await
    .unwrap();

    let sales_before = sales_count().await;
    let doomed = write_csv(
        dir.path(),
        "doomed.csv",
        "Date,Cash,Transfer,Lady,Drinks\n2024-11-07,700,0,,0\n2024-11-07,0,0,Ice,1\n",
    );
    let err = import_sales_from_file(&doomed, &options).await;
    assert!(err.is_err());
    assert_eq!(sales_count().await, sales_before);

    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "ALTER TABLE lady_drinks_hidden RENAME TO lady_drinks".to_string(),
    ))
    .await
    .unwrap();

    // --- Missing file aborts before any row is processed ---
    let missing = import_sales_from_file(dir.path().join("nope.csv").as_path(), &options).await;
    let err = missing.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ImportError>(),
        Some(ImportError::FileNotFound(_))
    ));

    // --- Interactive save replaces the whole date, unlike the import ---
    lady_drinks::service::save_for_date(
        SaveLadyDrinksDto {
            date: "2024-11-03".to_string(),
            lady_drinks: vec![LadyDrinkEntryDto {
                lady_id: kiki.id.clone(),
                drink_count: 4,
            }],
        },
        Some(admin_id.clone()),
    )
    .await
    .unwrap();

    let after_replace = lady_drinks::repository::get_by_date("2024-11-03").await.unwrap();
    assert_eq!(after_replace.len(), 1);
    assert_eq!(after_replace[0].lady_id, kiki.id);
    assert_eq!(after_replace[0].drink_count, 4);
}
