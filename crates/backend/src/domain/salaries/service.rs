use anyhow::Result;
use contracts::domain::salary::{CreateSalaryDto, Salary, UpdateSalaryDto};

use super::repository::{self, NewSalary};

pub async fn create(dto: CreateSalaryDto, created_by: Option<String>) -> Result<Salary> {
    if dto.amount <= 0.0 {
        return Err(anyhow::anyhow!("Amount must be a positive number"));
    }

    let id = repository::insert(&NewSalary {
        date: dto.date,
        amount: dto.amount,
        employee_id: dto.employee_id,
        position: dto.position,
        notes: dto.notes,
        created_by,
    })
    .await?;

    repository::get_by_id(&id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Salary vanished after insert"))
}

pub async fn list(start_date: Option<String>, end_date: Option<String>) -> Result<Vec<Salary>> {
    repository::list(start_date.as_deref(), end_date.as_deref()).await
}

pub async fn get_by_id(id: &str) -> Result<Option<Salary>> {
    repository::get_by_id(id).await
}

pub async fn update(id: &str, dto: UpdateSalaryDto) -> Result<Option<Salary>> {
    let Some(mut salary) = repository::get_by_id(id).await? else {
        return Ok(None);
    };

    if let Some(amount) = dto.amount {
        if amount <= 0.0 {
            return Err(anyhow::anyhow!("Amount must be a positive number"));
        }
        salary.amount = amount;
    }
    if dto.notes.is_some() {
        salary.notes = dto.notes;
    }

    repository::update(&salary).await?;
    repository::get_by_id(id).await
}

pub async fn delete(id: &str) -> Result<bool> {
    repository::delete(id).await
}
