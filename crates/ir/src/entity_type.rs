//! Entity type palette
//!
//! Entity types are tags with a bilingual label and a default color. The
//! catalog is fixed; entities copy the tag and color when created instead of
//! holding a reference into it.

use serde::{Deserialize, Serialize};

/// Display language for palette labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl Locale {
    /// Parse a locale code (`ko`, `en`)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "ko" => Some(Locale::Ko),
            "en" => Some(Locale::En),
            _ => None,
        }
    }
}

/// Label in both supported languages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub ko: String,
    pub en: String,
}

impl LocalizedName {
    pub fn new(ko: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ko: ko.into(),
            en: en.into(),
        }
    }

    /// Label for the given locale
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ko => &self.ko,
            Locale::En => &self.en,
        }
    }
}

/// Palette entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityType {
    /// Tag stored on entities
    pub id: String,
    pub name: LocalizedName,
    /// Default color, `#rrggbb`
    pub color: String,
}

impl EntityType {
    fn new(id: &str, ko: &str, en: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: LocalizedName::new(ko, en),
            color: color.to_string(),
        }
    }
}

/// Tag used when a template does not name a type
pub const DEFAULT_ENTITY_TYPE: &str = "custom";

/// Color paired with [`DEFAULT_ENTITY_TYPE`]
pub const DEFAULT_ENTITY_COLOR: &str = "#3b82f6";

/// The built-in palette, in display order
pub fn default_palette() -> Vec<EntityType> {
    vec![
        EntityType::new("parent", "부모", "Parent", "#6366f1"),
        EntityType::new("child", "자식", "Child", "#22c55e"),
        EntityType::new("mapping", "매핑", "Mapping", "#f97316"),
        EntityType::new("covering", "커버링", "Covering", "#eab308"),
        EntityType::new("history", "히스토리", "History", "#8b5cf6"),
        EntityType::new("code", "코드", "Code", "#14b8a6"),
        EntityType::new("log", "로그", "Log", "#64748b"),
        EntityType::new(DEFAULT_ENTITY_TYPE, "커스텀", "Custom", DEFAULT_ENTITY_COLOR),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_contents() {
        let palette = default_palette();
        assert_eq!(palette.len(), 8);
        assert_eq!(palette[0].id, "parent");
        assert_eq!(palette[0].color, "#6366f1");

        let custom = palette.iter().find(|t| t.id == DEFAULT_ENTITY_TYPE).unwrap();
        assert_eq!(custom.color, DEFAULT_ENTITY_COLOR);
    }

    #[test]
    fn test_localized_names_returned_verbatim() {
        let palette = default_palette();
        let child = &palette[1];
        assert_eq!(child.name.get(Locale::Ko), "자식");
        assert_eq!(child.name.get(Locale::En), "Child");
    }

    #[test]
    fn test_locale_from_code() {
        assert_eq!(Locale::from_code("EN"), Some(Locale::En));
        assert_eq!(Locale::from_code("ko"), Some(Locale::Ko));
        assert_eq!(Locale::from_code("fr"), None);
    }
}
