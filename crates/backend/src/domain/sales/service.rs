use anyhow::Result;
use contracts::domain::sale::{CreateSaleDto, Sale, UpdateSaleDto};

use super::repository::{self, NewSale, SaleFilters};

const PAYMENT_METHODS: &[&str] = &["cash", "transfer"];

pub async fn create(dto: CreateSaleDto, created_by: Option<String>) -> Result<Sale> {
    if dto.amount <= 0.0 {
        return Err(anyhow::anyhow!("Amount must be a positive number"));
    }
    if !PAYMENT_METHODS.contains(&dto.payment_method.as_str()) {
        return Err(anyhow::anyhow!(
            "Invalid payment method '{}'. Allowed: {}",
            dto.payment_method,
            PAYMENT_METHODS.join(", ")
        ));
    }

    let id = repository::insert(&NewSale {
        date: dto.date,
        amount: dto.amount,
        payment_method: dto.payment_method,
        category: dto.category,
        notes: dto.notes,
        created_by,
    })
    .await?;

    repository::get_by_id(&id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Sale vanished after insert"))
}

pub async fn list(filters: SaleFilters) -> Result<Vec<Sale>> {
    repository::list(&filters).await
}

pub async fn get_by_id(id: &str) -> Result<Option<Sale>> {
    repository::get_by_id(id).await
}

pub async fn update(id: &str, dto: UpdateSaleDto) -> Result<Option<Sale>> {
    let Some(mut sale) = repository::get_by_id(id).await? else {
        return Ok(None);
    };

    if let Some(date) = dto.date {
        sale.date = date;
    }
    if let Some(amount) = dto.amount {
        if amount <= 0.0 {
            return Err(anyhow::anyhow!("Amount must be a positive number"));
        }
        sale.amount = amount;
    }
    if let Some(method) = dto.payment_method {
        if !PAYMENT_METHODS.contains(&method.as_str()) {
            return Err(anyhow::anyhow!("Invalid payment method '{}'", method));
        }
        sale.payment_method = method;
    }
    if let Some(category) = dto.category {
        sale.category = category;
    }
    if dto.notes.is_some() {
        sale.notes = dto.notes;
    }

    repository::update(&sale).await?;
    repository::get_by_id(id).await
}

pub async fn delete(id: &str) -> Result<bool> {
    repository::delete(id).await
}
