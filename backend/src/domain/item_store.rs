//! Immutable-update collection of expense items.
//!
//! Every operation returns a new `ItemStore` instead of mutating the current
//! one. The backing vector is shared behind an `Arc`, so an operation that
//! changes nothing hands back the very same collection and callers can detect
//! "no change" with `same_collection`.

use std::sync::Arc;

use shared::{ExpenseItem, ExpenseTrackerConfig, FieldUpdate, Position, DEFAULT_CATEGORY};
use tracing::{debug, warn};

use crate::domain::models::{parse_amount, ExpenseError};

#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Arc<Vec<ExpenseItem>>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<ExpenseItem>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }

    /// Items in insertion (display) order
    pub fn items(&self) -> &[ExpenseItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpenseItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ExpenseItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// True when both stores share the same underlying collection
    pub fn same_collection(&self, other: &ItemStore) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// Append an item. An item whose ID is already present is ignored.
    pub fn add(&self, item: ExpenseItem) -> ItemStore {
        if self.contains(&item.id) {
            warn!("Ignoring add of duplicate expense id {}", item.id);
            return self.clone();
        }

        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend(self.items.iter().cloned());
        items.push(item);
        Self::from_items(items)
    }

    /// Replace one field of the item with `id`. No-op when the ID is unknown.
    pub fn update(&self, id: &str, update: FieldUpdate) -> ItemStore {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            debug!("Update of {} skipped: expense {} not found", update.field_name(), id);
            return self.clone();
        };

        let mut items = self.items.as_ref().clone();
        apply_field_update(&mut items[index], update);
        Self::from_items(items)
    }

    /// Drop the item with `id`. No-op when the ID is unknown.
    pub fn remove(&self, id: &str) -> ItemStore {
        if !self.contains(id) {
            debug!("Remove skipped: expense {} not found", id);
            return self.clone();
        }

        let items = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        Self::from_items(items)
    }
}

fn apply_field_update(item: &mut ExpenseItem, update: FieldUpdate) {
    match update {
        FieldUpdate::Name(name) => item.name = name,
        FieldUpdate::Icon(icon) => item.icon = icon,
        FieldUpdate::Amount(amount) => item.amount = amount,
        FieldUpdate::Date(date) => item.date = date,
        FieldUpdate::Category(category) => {
            // a blank category never reaches the store
            item.category = if category.trim().is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                category
            };
        }
        FieldUpdate::Color(color) => item.color = color,
        FieldUpdate::Position(position) => item.position = position,
    }
}

/// Turn an inline edit (field name + raw text) into a typed update.
///
/// Amounts are coerced to numbers and must be non-negative; an empty category
/// falls back to the configured default; positions are written as "x,y".
pub fn parse_field_update(
    field: &str,
    raw_value: &str,
    config: &ExpenseTrackerConfig,
) -> Result<FieldUpdate, ExpenseError> {
    match field {
        "name" => Ok(FieldUpdate::Name(raw_value.to_string())),
        "icon" => Ok(FieldUpdate::Icon(raw_value.to_string())),
        "date" => Ok(FieldUpdate::Date(raw_value.to_string())),
        "color" => Ok(FieldUpdate::Color(raw_value.to_string())),
        "category" => {
            let category = raw_value.trim();
            if category.is_empty() {
                Ok(FieldUpdate::Category(config.default_category.clone()))
            } else {
                Ok(FieldUpdate::Category(category.to_string()))
            }
        }
        "amount" => {
            let amount = parse_amount(raw_value, &config.currency_symbol)?;
            if amount < 0.0 {
                return Err(ExpenseError::NegativeAmount);
            }
            Ok(FieldUpdate::Amount(amount))
        }
        "position" => parse_position(raw_value).map(FieldUpdate::Position),
        "id" => Err(ExpenseError::ReadOnlyField(field.to_string())),
        other => Err(ExpenseError::UnknownField(other.to_string())),
    }
}

fn parse_position(raw_value: &str) -> Result<Position, ExpenseError> {
    let invalid = || ExpenseError::InvalidPosition(raw_value.to_string());

    let (x, y) = raw_value.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<f64>().map_err(|_| invalid())?;
    let y = y.trim().parse::<f64>().map_err(|_| invalid())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }

    Ok(Position::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_item(id: &str, name: &str, amount: f64) -> ExpenseItem {
        ExpenseItem {
            id: id.to_string(),
            name: name.to_string(),
            icon: "🏷️".to_string(),
            amount,
            date: "6/13/2025, 9:00:00 AM".to_string(),
            category: "Uncategorized".to_string(),
            color: "#336699".to_string(),
            position: Position::new(20.0, 100.0),
        }
    }

    fn create_test_store() -> ItemStore {
        ItemStore::new()
            .add(create_test_item("expense::1::0", "Rent", 1200.0))
            .add(create_test_item("expense::1::1", "Dining", 100.0))
    }

    #[test]
    fn test_add_appends_in_order() {
        let store = create_test_store();

        let names: Vec<&str> = store.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Dining"]);
    }

    #[test]
    fn test_add_returns_new_collection() {
        let store = create_test_store();
        let added = store.add(create_test_item("expense::1::2", "Coffee", 4.5));

        assert!(!added.same_collection(&store));
        assert_eq!(store.len(), 2);
        assert_eq!(added.len(), 3);
    }

    #[test]
    fn test_add_duplicate_id_is_noop() {
        let store = create_test_store();
        let unchanged = store.add(create_test_item("expense::1::0", "Again", 1.0));

        assert!(unchanged.same_collection(&store));
    }

    #[test]
    fn test_update_replaces_single_field() {
        let store = create_test_store();
        let updated = store.update("expense::1::1", FieldUpdate::Amount(150.0));

        assert!(!updated.same_collection(&store));
        assert_eq!(updated.get("expense::1::1").unwrap().amount, 150.0);
        assert_eq!(updated.get("expense::1::1").unwrap().name, "Dining");
        assert_eq!(updated.get("expense::1::0").unwrap().amount, 1200.0);
        // the original collection is untouched
        assert_eq!(store.get("expense::1::1").unwrap().amount, 100.0);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let store = create_test_store();
        let unchanged = store.update("expense::9::9", FieldUpdate::Name("Nope".to_string()));

        assert!(unchanged.same_collection(&store));
    }

    #[test]
    fn test_update_with_blank_category_uses_default() {
        let store = create_test_store();

        let updated = store.update("expense::1::0", FieldUpdate::Category("Housing".to_string()));
        assert_eq!(updated.get("expense::1::0").unwrap().category, "Housing");

        let blanked = updated.update("expense::1::0", FieldUpdate::Category(String::new()));
        assert_eq!(blanked.get("expense::1::0").unwrap().category, DEFAULT_CATEGORY);

        let spaces = updated.update("expense::1::0", FieldUpdate::Category("  ".to_string()));
        assert_eq!(spaces.get("expense::1::0").unwrap().category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_remove() {
        let store = create_test_store();
        let removed = store.remove("expense::1::0");

        assert_eq!(removed.len(), 1);
        assert!(removed.get("expense::1::0").is_none());
        assert!(store.get("expense::1::0").is_some());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let store = create_test_store();
        assert!(store.remove("missing").same_collection(&store));
    }

    #[test]
    fn test_count_tracks_successful_adds_and_removes() {
        let mut store = ItemStore::new();
        let mut successful_adds = 0;
        let mut successful_removes = 0;

        for i in 0..10 {
            let next = store.add(create_test_item(&format!("expense::1::{}", i), "Item", 1.0));
            if !next.same_collection(&store) {
                successful_adds += 1;
            }
            store = next;
        }
        // duplicate add and removes of both present and missing ids
        store = store.add(create_test_item("expense::1::3", "Item", 1.0));
        for id in ["expense::1::2", "expense::1::2", "expense::1::7", "missing"] {
            let next = store.remove(id);
            if !next.same_collection(&store) {
                successful_removes += 1;
            }
            store = next;
        }

        assert_eq!(successful_adds, 10);
        assert_eq!(successful_removes, 2);
        assert_eq!(store.len(), successful_adds - successful_removes);
    }

    #[test]
    fn test_parse_field_update_amount() {
        let config = ExpenseTrackerConfig::default();

        assert_eq!(
            parse_field_update("amount", "$1,200", &config).unwrap(),
            FieldUpdate::Amount(1200.0)
        );
        assert_eq!(
            parse_field_update("amount", "0", &config).unwrap(),
            FieldUpdate::Amount(0.0)
        );
        assert_eq!(
            parse_field_update("amount", "-3", &config),
            Err(ExpenseError::NegativeAmount)
        );
        assert!(matches!(
            parse_field_update("amount", "twelve", &config),
            Err(ExpenseError::InvalidAmountFormat(_))
        ));
    }

    #[test]
    fn test_parse_field_update_category_fallback() {
        let config = ExpenseTrackerConfig::default();

        assert_eq!(
            parse_field_update("category", "   ", &config).unwrap(),
            FieldUpdate::Category("Uncategorized".to_string())
        );
        assert_eq!(
            parse_field_update("category", " Food ", &config).unwrap(),
            FieldUpdate::Category("Food".to_string())
        );
    }

    #[test]
    fn test_parse_field_update_position() {
        let config = ExpenseTrackerConfig::default();

        assert_eq!(
            parse_field_update("position", "12.5, 40", &config).unwrap(),
            FieldUpdate::Position(Position::new(12.5, 40.0))
        );
        assert!(matches!(
            parse_field_update("position", "12", &config),
            Err(ExpenseError::InvalidPosition(_))
        ));
    }

    #[test]
    fn test_parse_field_update_rejects_id_and_unknown() {
        let config = ExpenseTrackerConfig::default();

        assert_eq!(
            parse_field_update("id", "x", &config),
            Err(ExpenseError::ReadOnlyField("id".to_string()))
        );
        assert_eq!(
            parse_field_update("balance", "x", &config),
            Err(ExpenseError::UnknownField("balance".to_string()))
        );
    }
}
