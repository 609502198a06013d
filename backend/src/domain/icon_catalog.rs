//! Read-only catalog of predefined expenses offered by the add menu.

use shared::IconCatalogEntry;

#[derive(Debug, Clone)]
pub struct IconCatalog {
    entries: Vec<IconCatalogEntry>,
}

impl IconCatalog {
    pub fn new(entries: Vec<IconCatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[IconCatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&IconCatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Case-insensitive substring match on the label, in catalog order.
    /// A blank query returns the whole catalog.
    pub fn search(&self, query: &str) -> Vec<&IconCatalogEntry> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|entry| needle.is_empty() || entry.label.to_lowercase().contains(&needle))
            .collect()
    }
}

impl Default for IconCatalog {
    fn default() -> Self {
        let entry = |id: &str, label: &str, icon: &str, default_amount: f64, color: &str, category: &str| {
            IconCatalogEntry {
                id: id.to_string(),
                label: label.to_string(),
                icon: icon.to_string(),
                default_amount,
                color: color.to_string(),
                category: category.to_string(),
            }
        };

        Self::new(vec![
            entry("rent", "Rent", "🏠", 1200.0, "#4e79a7", "Housing"),
            entry("utilities", "Utilities", "💡", 150.0, "#f28e2b", "Housing"),
            entry("groceries", "Groceries", "🛒", 80.0, "#59a14f", "Food"),
            entry("dining", "Dining", "🍽️", 40.0, "#e15759", "Food"),
            entry("coffee", "Coffee", "☕", 5.0, "#9c755f", "Food"),
            entry("transport", "Transport", "🚌", 3.0, "#76b7b2", "Transport"),
            entry("fuel", "Fuel", "⛽", 60.0, "#edc948", "Transport"),
            entry("phone", "Phone", "📱", 45.0, "#b07aa1", "Bills"),
            entry("entertainment", "Entertainment", "🎬", 25.0, "#ff9da7", "Leisure"),
            entry("shopping", "Shopping", "🛍️", 50.0, "#bab0ac", "Leisure"),
            entry("health", "Health", "💊", 30.0, "#86bcb6", "Health"),
            entry("travel", "Travel", "✈️", 400.0, "#d37295", "Leisure"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = IconCatalog::default();

        let labels: Vec<&str> = catalog.search("EN").iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Rent", "Entertainment"]);
    }

    #[test]
    fn test_blank_search_returns_everything() {
        let catalog = IconCatalog::default();

        assert_eq!(catalog.search("").len(), catalog.entries().len());
        assert_eq!(catalog.search("   ").len(), catalog.entries().len());
    }

    #[test]
    fn test_search_without_match() {
        let catalog = IconCatalog::default();
        assert!(catalog.search("yacht").is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = IconCatalog::default();

        assert_eq!(catalog.get("coffee").unwrap().default_amount, 5.0);
        assert!(catalog.get("unknown").is_none());
    }
}
