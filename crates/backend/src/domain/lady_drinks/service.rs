use anyhow::Result;
use contracts::domain::lady::{LadyDrink, LadyDrinksSummary, SaveLadyDrinksDto};

use super::repository;

/// Сохранение учёта за день из интерфейса (полная замена записей даты)
pub async fn save_for_date(dto: SaveLadyDrinksDto, created_by: Option<String>) -> Result<Vec<LadyDrink>> {
    if dto.date.trim().is_empty() {
        return Err(anyhow::anyhow!("Date is required"));
    }
    for entry in &dto.lady_drinks {
        if entry.drink_count < 0 {
            return Err(anyhow::anyhow!("Drink count cannot be negative"));
        }
    }

    let entries: Vec<(String, i64)> = dto
        .lady_drinks
        .iter()
        .map(|e| (e.lady_id.clone(), e.drink_count))
        .collect();

    repository::replace_for_date(&dto.date, &entries, created_by.as_deref()).await?;
    repository::get_by_date(&dto.date).await
}

pub async fn get_by_date(date: &str) -> Result<Vec<LadyDrink>> {
    repository::get_by_date(date).await
}

pub async fn get_by_date_range(start_date: &str, end_date: &str) -> Result<Vec<LadyDrink>> {
    repository::get_by_date_range(start_date, end_date).await
}

pub async fn get_summary(start_date: &str, end_date: &str) -> Result<Vec<LadyDrinksSummary>> {
    repository::get_summary(start_date, end_date).await
}
