use serde::{Deserialize, Serialize};

/// Продажа за день: одна запись на каждую оплату (наличные или перевод)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    /// ISO date `YYYY-MM-DD`
    pub date: String,
    pub amount: f64,
    pub payment_method: String,
    pub category: String,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_by_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleDto {
    pub date: String,
    pub amount: f64,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaleDto {
    pub date: Option<String>,
    pub amount: Option<f64>,
    pub payment_method: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

fn default_payment_method() -> String {
    "cash".to_string()
}

fn default_category() -> String {
    "drinks".to_string()
}

/// Сводка по продажам за период
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_transactions: i64,
    pub total_sales: f64,
    pub average_sale: f64,
    pub highest_sale: f64,
    pub lowest_sale: f64,
    pub days_with_sales: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub count: i64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodTotal {
    pub payment_method: String,
    pub count: i64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: String,
    pub transactions: i64,
    pub total: f64,
}
