use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub receipt_url: Option<String>,
    pub created_by: Option<String>,
    pub created_by_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseDto {
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub receipt_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseDto {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub receipt_url: Option<String>,
}

/// Сводка по расходам за период
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpensesSummary {
    pub total_transactions: i64,
    pub total_expenses: f64,
    pub average_expense: f64,
    pub highest_expense: f64,
    pub lowest_expense: f64,
    pub days_with_expenses: i64,
}
