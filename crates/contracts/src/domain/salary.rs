use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salary {
    pub id: String,
    pub date: String,
    pub amount: f64,
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    pub position: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_by_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalaryDto {
    pub date: String,
    pub amount: f64,
    pub employee_id: Option<String>,
    pub position: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSalaryDto {
    pub amount: Option<f64>,
    pub notes: Option<String>,
}

/// Сводка по зарплатам за период
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalariesSummary {
    pub total_count: i64,
    pub total_amount: f64,
    pub average_amount: f64,
}
