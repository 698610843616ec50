use serde::{Deserialize, Serialize};

use crate::domain::expense::ExpensesSummary;
use crate::domain::salary::SalariesSummary;
use crate::domain::sale::{CategoryTotal, DailyTotal, SalesSummary};

/// Период отчёта
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSection {
    pub summary: SalesSummary,
    pub by_category: Vec<CategoryTotal>,
    pub daily: Vec<DailyTotal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesSection {
    pub summary: ExpensesSummary,
    pub by_category: Vec<CategoryTotal>,
    pub daily: Vec<DailyTotal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalariesSection {
    pub summary: SalariesSummary,
}

/// Итоговые показатели периода
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    pub total_sales: f64,
    pub total_expenses: f64,
    pub total_salaries: f64,
    pub net_profit: f64,
    pub profit_margin: f64,
}

/// Дневная строка сводного ряда: продажи и расходы вместе
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCombined {
    pub date: String,
    pub sales: f64,
    pub expenses: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub period: ReportPeriod,
    pub sales: SalesSection,
    pub expenses: ExpensesSection,
    pub salaries: SalariesSection,
    pub financials: Financials,
    pub daily_data: Vec<DailyCombined>,
}

/// Один месяц сводки на главном экране
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthSummary {
    pub name: String,
    pub sales: f64,
    pub expenses: f64,
    pub salaries: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub months: Vec<MonthSummary>,
}

/// Запись журнала действий
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: String,
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub created_at: String,
}
