use anyhow::Result;
use contracts::domain::expense::{CreateExpenseDto, Expense, UpdateExpenseDto};

use super::repository::{self, ExpenseFilters, NewExpense};

pub async fn create(dto: CreateExpenseDto, created_by: Option<String>) -> Result<Expense> {
    if dto.amount <= 0.0 {
        return Err(anyhow::anyhow!("Amount must be a positive number"));
    }
    if dto.category.trim().is_empty() {
        return Err(anyhow::anyhow!("Category is required"));
    }

    let id = repository::insert(&NewExpense {
        date: dto.date,
        amount: dto.amount,
        category: dto.category,
        description: dto.description,
        receipt_url: dto.receipt_url,
        created_by,
    })
    .await?;

    repository::get_by_id(&id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Expense vanished after insert"))
}

pub async fn list(filters: ExpenseFilters) -> Result<Vec<Expense>> {
    repository::list(&filters).await
}

pub async fn get_by_id(id: &str) -> Result<Option<Expense>> {
    repository::get_by_id(id).await
}

pub async fn update(id: &str, dto: UpdateExpenseDto) -> Result<Option<Expense>> {
    let Some(mut expense) = repository::get_by_id(id).await? else {
        return Ok(None);
    };

    if let Some(amount) = dto.amount {
        if amount <= 0.0 {
            return Err(anyhow::anyhow!("Amount must be a positive number"));
        }
        expense.amount = amount;
    }
    if let Some(category) = dto.category {
        expense.category = category;
    }
    if dto.description.is_some() {
        expense.description = dto.description;
    }
    if dto.receipt_url.is_some() {
        expense.receipt_url = dto.receipt_url;
    }

    repository::update(&expense).await?;
    repository::get_by_id(id).await
}

pub async fn delete(id: &str) -> Result<bool> {
    repository::delete(id).await
}
