use anyhow::Result;
use contracts::domain::employee::{CreateEmployeeDto, Employee, UpdateEmployeeDto};

use super::repository;

pub async fn create(dto: CreateEmployeeDto) -> Result<Employee> {
    let name = dto.name.trim().to_string();
    if name.is_empty() {
        return Err(anyhow::anyhow!("Name is required"));
    }

    let id = repository::insert(&name, dto.position.as_deref()).await?;
    repository::get_by_id(&id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Employee vanished after insert"))
}

pub async fn list(include_inactive: bool) -> Result<Vec<Employee>> {
    repository::list(include_inactive).await
}

pub async fn get_by_id(id: &str) -> Result<Option<Employee>> {
    repository::get_by_id(id).await
}

pub async fn update(id: &str, dto: UpdateEmployeeDto) -> Result<Option<Employee>> {
    let Some(mut employee) = repository::get_by_id(id).await? else {
        return Ok(None);
    };

    if let Some(name) = dto.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(anyhow::anyhow!("Name is required"));
        }
        employee.name = name;
    }
    if dto.position.is_some() {
        employee.position = dto.position;
    }
    if let Some(is_active) = dto.is_active {
        employee.is_active = is_active;
    }

    repository::update(&employee).await?;
    repository::get_by_id(id).await
}

pub async fn deactivate(id: &str) -> Result<Option<Employee>> {
    if !repository::deactivate(id).await? {
        return Ok(None);
    }
    repository::get_by_id(id).await
}
