use std::collections::HashMap;

use anyhow::Result;
use contracts::domain::lady::Lady;

use crate::domain::ladies;

/// Справочник имя → id, построенный один раз на прогон из активного
/// состава. Неизменяемый, передаётся вниз по конвейеру; поиск без учёта
/// регистра.
#[derive(Debug, Clone)]
pub struct LadyDirectory {
    by_name: HashMap<String, String>,
    names: Vec<String>,
}

impl LadyDirectory {
    pub fn new(ladies: &[Lady]) -> Self {
        let mut by_name = HashMap::new();
        let mut names = Vec::new();
        for lady in ladies {
            by_name.insert(lady.name.to_lowercase(), lady.id.clone());
            names.push(lady.name.clone());
        }
        Self { by_name, names }
    }

    pub async fn load() -> Result<Self> {
        let active = ladies::repository::list_active().await?;
        tracing::info!(
            "Loaded {} active ladies: {}",
            active.len(),
            active
                .iter()
                .map(|l| l.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(Self::new(&active))
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.by_name.get(&name.trim().to_lowercase()).map(|s| s.as_str())
    }

    /// Известные имена для сообщения об ошибке
    pub fn known_names(&self) -> String {
        self.names.join(", ")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lady(id: &str, name: &str) -> Lady {
        Lady {
            id: id.to_string(),
            name: name.to_string(),
            is_active: true,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        let directory = LadyDirectory::new(&[lady("a1", "Ice"), lady("b2", "Kiki")]);
        assert_eq!(directory.resolve("ice"), Some("a1"));
        assert_eq!(directory.resolve("ICE"), Some("a1"));
        assert_eq!(directory.resolve(" Kiki "), Some("b2"));
        assert_eq!(directory.resolve("Peachy"), None);
    }

    #[test]
    fn test_known_names_keep_original_spelling() {
        let directory = LadyDirectory::new(&[lady("a1", "Ice"), lady("b2", "Kiki")]);
        assert_eq!(directory.known_names(), "Ice, Kiki");
        assert_eq!(directory.len(), 2);
        assert!(!directory.is_empty());
    }
}
