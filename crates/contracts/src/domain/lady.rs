use serde::{Deserialize, Serialize};

/// Сотрудница зала; активный состав используется при импорте ведомости
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lady {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLadyDto {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLadyDto {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

/// Учёт напитков: не больше одной записи на пару (дата, сотрудница)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LadyDrink {
    pub id: String,
    pub date: String,
    pub lady_id: String,
    pub lady_name: Option<String>,
    pub drink_count: i64,
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Одна позиция интерактивного сохранения за день
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LadyDrinkEntryDto {
    pub lady_id: String,
    pub drink_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLadyDrinksDto {
    pub date: String,
    pub lady_drinks: Vec<LadyDrinkEntryDto>,
}

/// Итог по сотруднице за период
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LadyDrinksSummary {
    pub lady_id: String,
    pub lady_name: String,
    pub total_drinks: i64,
    pub days_worked: i64,
}
