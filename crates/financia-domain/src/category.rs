//! Fixed category taxonomy applied to transactions.

use serde::{Deserialize, Serialize};

use crate::common::*;

const FALLBACK_ICON: &str = "tags";
const FALLBACK_COLOR: &str = "slate";

/// A catalog entry. Icon and color are symbolic references for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
        }
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} [{}]", self.name, self.icon)
    }
}

/// Ordered, read-only catalog of categories with unique names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    entries: Vec<Category>,
    fallback: Category,
}

impl CategoryCatalog {
    pub fn new(entries: Vec<Category>) -> Self {
        Self {
            entries,
            fallback: Category::new("", "", FALLBACK_ICON, FALLBACK_COLOR),
        }
    }

    /// Entries in catalog order.
    pub fn entries(&self) -> &[Category] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|category| category.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-sensitive lookup by name.
    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        self.entries.iter().find(|category| category.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    /// Entry used to render `name`; unknown names get a neutral placeholder.
    pub fn display_for(&self, name: &str) -> &Category {
        self.find_by_name(name).unwrap_or(&self.fallback)
    }

    /// Default selection for entry forms.
    pub fn first(&self) -> Option<&Category> {
        self.entries.first()
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::new(vec![
            Category::new("1", "Alimentação", "utensils", "orange"),
            Category::new("2", "Moradia", "house", "blue"),
            Category::new("3", "Transporte", "car", "purple"),
            Category::new("4", "Saúde", "heart-pulse", "red"),
            Category::new("5", "Educação", "graduation-cap", "emerald"),
            Category::new("6", "Lazer", "clapperboard", "pink"),
            Category::new("7", "Trabalho", "briefcase", "indigo"),
            Category::new("8", "Outros", "tags", "gray"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_keeps_order_and_unique_names() {
        let catalog = CategoryCatalog::default();
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names.first(), Some(&"Alimentação"));
        assert_eq!(names.last(), Some(&"Outros"));
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }

    #[test]
    fn unknown_names_render_with_placeholder() {
        let catalog = CategoryCatalog::default();
        assert!(catalog.find_by_name("Viagem").is_none());
        let shown = catalog.display_for("Viagem");
        assert_eq!(shown.icon, "tags");
        assert_eq!(shown.color, "slate");
        assert_eq!(catalog.display_for("Moradia").color, "blue");
    }
}
