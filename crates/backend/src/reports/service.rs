use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use contracts::domain::sale::DailyTotal;
use contracts::reports::{
    ActivityLogEntry, DailyCombined, DashboardReport, ExpensesSection, FinancialReport,
    Financials, MonthSummary, ReportPeriod, SalariesSection, SalesSection,
};

use super::repository;
use crate::domain::{expenses, salaries, sales};

/// Сводный финансовый отчёт за период
pub async fn financial_report(start_date: &str, end_date: &str) -> Result<FinancialReport> {
    let sales_summary = sales::repository::get_summary(start_date, end_date).await?;
    let sales_by_category = sales::repository::get_by_category(start_date, end_date).await?;
    let daily_sales = sales::repository::get_daily(start_date, end_date).await?;

    let expenses_summary = expenses::repository::get_summary(start_date, end_date).await?;
    let expenses_by_category = expenses::repository::get_by_category(start_date, end_date).await?;
    let daily_expenses = expenses::repository::get_daily(start_date, end_date).await?;

    let salaries_summary = salaries::repository::get_summary(start_date, end_date).await?;

    let total_sales = sales_summary.total_sales;
    let total_expenses = expenses_summary.total_expenses;
    let total_salaries = salaries_summary.total_amount;
    let net_profit = total_sales - total_expenses - total_salaries;
    let profit_margin = if total_sales > 0.0 {
        net_profit / total_sales * 100.0
    } else {
        0.0
    };

    let daily_data = combine_daily_data(&daily_sales, &daily_expenses);

    Ok(FinancialReport {
        period: ReportPeriod {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        },
        sales: SalesSection {
            summary: sales_summary,
            by_category: sales_by_category,
            daily: daily_sales,
        },
        expenses: ExpensesSection {
            summary: expenses_summary,
            by_category: expenses_by_category,
            daily: daily_expenses,
        },
        salaries: SalariesSection {
            summary: salaries_summary,
        },
        financials: Financials {
            total_sales,
            total_expenses,
            total_salaries,
            net_profit,
            profit_margin,
        },
        daily_data,
    })
}

/// Главный экран: последние три календарных месяца
pub async fn dashboard() -> Result<DashboardReport> {
    let today = Utc::now().date_naive();
    let mut months = Vec::with_capacity(3);

    for offset in (0..3).rev() {
        let (start, end) = month_bounds(today, offset);

        let sales_summary = sales::repository::get_summary(
            &start.format("%Y-%m-%d").to_string(),
            &end.format("%Y-%m-%d").to_string(),
        )
        .await?;
        let expenses_summary = expenses::repository::get_summary(
            &start.format("%Y-%m-%d").to_string(),
            &end.format("%Y-%m-%d").to_string(),
        )
        .await?;
        let salaries_summary = salaries::repository::get_summary(
            &start.format("%Y-%m-%d").to_string(),
            &end.format("%Y-%m-%d").to_string(),
        )
        .await?;

        months.push(MonthSummary {
            name: start.format("%B %Y").to_string(),
            sales: sales_summary.total_sales,
            expenses: expenses_summary.total_expenses,
            salaries: salaries_summary.total_amount,
            profit: sales_summary.total_sales
                - expenses_summary.total_expenses
                - salaries_summary.total_amount,
        });
    }

    Ok(DashboardReport { months })
}

pub async fn activity_logs(limit: u64, offset: u64) -> Result<Vec<ActivityLogEntry>> {
    repository::list_activity_logs(limit, offset).await
}

/// Границы календарного месяца, отстоящего на `offset` месяцев назад
fn month_bounds(today: NaiveDate, offset: u32) -> (NaiveDate, NaiveDate) {
    let months_since_epoch = today.year() * 12 + today.month0() as i32 - offset as i32;
    let year = months_since_epoch.div_euclid(12);
    let month0 = months_since_epoch.rem_euclid(12) as u32;

    let start = NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap();
    let next = if month0 == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1).unwrap()
    };
    (start, next - chrono::Duration::days(1))
}

/// Слияние дневных рядов продаж и расходов в один отсортированный ряд
fn combine_daily_data(daily_sales: &[DailyTotal], daily_expenses: &[DailyTotal]) -> Vec<DailyCombined> {
    let mut by_date: BTreeMap<String, DailyCombined> = BTreeMap::new();

    for item in daily_sales {
        by_date.insert(
            item.date.clone(),
            DailyCombined {
                date: item.date.clone(),
                sales: item.total,
                expenses: 0.0,
                profit: item.total,
            },
        );
    }

    for item in daily_expenses {
        let entry = by_date.entry(item.date.clone()).or_insert(DailyCombined {
            date: item.date.clone(),
            sales: 0.0,
            expenses: 0.0,
            profit: 0.0,
        });
        entry.expenses = item.total;
        entry.profit = entry.sales - entry.expenses;
    }

    by_date.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(date: &str, total: f64) -> DailyTotal {
        DailyTotal {
            date: date.to_string(),
            transactions: 1,
            total,
        }
    }

    #[test]
    fn test_combine_daily_data_merges_and_sorts() {
        let sales = vec![daily("2024-11-02", 300.0), daily("2024-11-01", 100.0)];
        let expenses = vec![daily("2024-11-02", 50.0), daily("2024-11-03", 70.0)];

        let combined = combine_daily_data(&sales, &expenses);
        assert_eq!(combined.len(), 3);
        assert_eq!(combined[0].date, "2024-11-01");
        assert_eq!(combined[0].profit, 100.0);
        assert_eq!(combined[1].date, "2024-11-02");
        assert_eq!(combined[1].profit, 250.0);
        assert_eq!(combined[2].date, "2024-11-03");
        assert_eq!(combined[2].profit, -70.0);
    }

    #[test]
    fn test_month_bounds() {
        let today = NaiveDate::from_ymd_opt(2024, 11, 15).unwrap();
        assert_eq!(
            month_bounds(today, 0),
            (
                NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 11, 30).unwrap()
            )
        );
        assert_eq!(
            month_bounds(today, 2),
            (
                NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()
            )
        );
    }

    #[test]
    fn test_month_bounds_across_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(
            month_bounds(today, 2),
            (
                NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 11, 30).unwrap()
            )
        );
    }
}
