use serde::{Deserialize, Serialize};

/// Параметры запуска импорта ведомости
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    /// Кто импортирует; если не задан, берётся любой администратор
    pub acting_user_id: Option<String>,
    #[serde(default)]
    pub skip_lady_drinks: bool,
    #[serde(default)]
    pub dry_run: bool,
}

/// Ссылка на созданную продажу в отчёте импорта
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// Строка ведомости, разобранная и записанная (или проверенная при dry-run)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowWritten {
    /// Номер строки листа, считая заголовок первой строкой
    pub row: usize,
    pub date: String,
    pub cash: f64,
    pub transfer: f64,
    pub lady_name: Option<String>,
    pub quantity: i64,
    pub sales_ids: Vec<SaleRef>,
    pub lady_drink_id: Option<String>,
}

/// Элемент списка `details`: либо успешная строка, либо строка с ошибкой
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowDetail {
    Written(RowWritten),
    Failed { row: usize, error: String },
}

/// Итог одного прогона импорта; единственное, что возвращает конвейер
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub success: usize,
    pub errors: usize,
    pub skipped: usize,
    pub sales_created: usize,
    pub lady_drinks_created: usize,
    pub details: Vec<RowDetail>,
}
