use anyhow::Result;
use contracts::domain::lady::{CreateLadyDto, Lady, UpdateLadyDto};

use super::repository;

pub async fn create(dto: CreateLadyDto) -> Result<Lady> {
    let name = dto.name.trim().to_string();
    if name.is_empty() {
        return Err(anyhow::anyhow!("Name is required"));
    }

    // Имя уникально без учёта регистра
    if repository::get_by_name(&name).await?.is_some() {
        return Err(anyhow::anyhow!("Lady with this name already exists"));
    }

    let id = repository::insert(&name).await?;
    repository::get_by_id(&id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Lady vanished after insert"))
}

pub async fn list(include_inactive: bool) -> Result<Vec<Lady>> {
    repository::list(include_inactive).await
}

pub async fn get_by_id(id: &str) -> Result<Option<Lady>> {
    repository::get_by_id(id).await
}

pub async fn update(id: &str, dto: UpdateLadyDto) -> Result<Option<Lady>> {
    let Some(mut lady) = repository::get_by_id(id).await? else {
        return Ok(None);
    };

    if let Some(name) = dto.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(anyhow::anyhow!("Name is required"));
        }
        if let Some(existing) = repository::get_by_name(&name).await? {
            if existing.id != id {
                return Err(anyhow::anyhow!("Lady with this name already exists"));
            }
        }
        lady.name = name;
    }
    if let Some(is_active) = dto.is_active {
        lady.is_active = is_active;
    }

    repository::update(&lady).await?;
    repository::get_by_id(id).await
}

pub async fn deactivate(id: &str) -> Result<Option<Lady>> {
    if !repository::deactivate(id).await? {
        return Ok(None);
    }
    repository::get_by_id(id).await
}
