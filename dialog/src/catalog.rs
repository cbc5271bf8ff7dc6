//! Category / subcategory taxonomy and supported cities.
//!
//! Read-only after load. Names travel inside callback tokens, so they must not contain the token
//! delimiter and every token built from them must fit the transport's callback-data limit.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::callback::{Action, SearchKind, DELIMITER, MAX_CALLBACK_BYTES};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    pub subcategories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub cities: Vec<String>,
}

impl Catalog {
    /// Parses a TOML catalog and validates it.
    pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.category(name).is_some()
    }

    pub fn has_subcategory(&self, category: &str, subcategory: &str) -> bool {
        self.category(category)
            .map(|c| c.subcategories.iter().any(|s| s == subcategory))
            .unwrap_or(false)
    }

    pub fn has_city(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    /// Checks names and the length of every callback token the keyboards will carry.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.categories.is_empty() {
            return Err(CatalogError::Invalid("no categories".to_string()));
        }
        if self.cities.is_empty() {
            return Err(CatalogError::Invalid("no cities".to_string()));
        }

        let mut tokens = Vec::new();
        for category in &self.categories {
            check_name("category", &category.name)?;
            if category.subcategories.is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "category {} has no subcategories",
                    category.name
                )));
            }
            for kind in [SearchKind::Employee, SearchKind::Job] {
                tokens.push(Action::Category {
                    name: category.name.clone(),
                    kind,
                });
                for sub in &category.subcategories {
                    tokens.push(Action::Subcategory {
                        name: sub.clone(),
                        kind,
                    });
                }
            }
            for sub in &category.subcategories {
                check_name("subcategory", sub)?;
            }
        }
        for city in &self.cities {
            check_name("city", city)?;
            tokens.push(Action::FormCity(city.clone()));
            for kind in [SearchKind::Employee, SearchKind::Job] {
                tokens.push(Action::City {
                    name: city.clone(),
                    kind,
                });
            }
        }

        for action in tokens {
            let encoded = action.encode();
            if encoded.len() > MAX_CALLBACK_BYTES {
                return Err(CatalogError::Invalid(format!(
                    "callback token {} is {} bytes, limit is {}",
                    encoded,
                    encoded.len(),
                    MAX_CALLBACK_BYTES
                )));
            }
        }
        Ok(())
    }
}

fn check_name(what: &str, name: &str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::Invalid(format!("empty {} name", what)));
    }
    if name.contains(DELIMITER) {
        return Err(CatalogError::Invalid(format!(
            "{} name {:?} contains '{}'",
            what, name, DELIMITER
        )));
    }
    Ok(())
}

impl Default for Catalog {
    fn default() -> Self {
        fn category(name: &str, emoji: &str, subs: &[&str]) -> Category {
            Category {
                name: name.to_string(),
                emoji: emoji.to_string(),
                subcategories: subs.iter().map(|s| s.to_string()).collect(),
            }
        }

        Self {
            categories: vec![
                category(
                    "Строительство",
                    "🏗",
                    &[
                        "Каменщик",
                        "Кладка",
                        "Электрик",
                        "Сантехник",
                        "Сварщик",
                        "Отделочник",
                        "Плиточник",
                        "Фасадчик",
                        "Монолитчик",
                        "Разнорабочий",
                    ],
                ),
                category(
                    "Общепит",
                    "🍽",
                    &["Повар", "Официант", "Бармен", "Посудомойщик", "Администратор", "Кассир"],
                ),
                category(
                    "Швейный цех",
                    "🧵",
                    &["Швея", "Закройщик", "Упаковщик", "Технолог", "Контролер качества"],
                ),
                category(
                    "IT",
                    "💻",
                    &["Программист", "Дизайнер", "Тестировщик", "Сисадмин"],
                ),
                category(
                    "Продажи",
                    "🛒",
                    &["Продавец", "Менеджер", "Консультант", "Кассир"],
                ),
                category(
                    "Транспорт",
                    "🚚",
                    &["Водитель", "Курьер", "Экспедитор", "Диспетчер"],
                ),
            ],
            cities: ["Бишкек", "Ош", "Талас", "Нарын", "Каракол", "Жалал-Абад", "Чолпон-Ата"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
