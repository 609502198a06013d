//! State of the "+" add menu: whether it is open and what is typed in its
//! search box. This is the only interaction the user can cancel.

use shared::IconCatalogEntry;
use tracing::debug;

use crate::domain::icon_catalog::IconCatalog;

/// Ways the menu can be dismissed without picking anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuDismissal {
    OutsideClick,
    Escape,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddMenuState {
    is_open: bool,
    query: String,
}

impl AddMenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn open(&mut self) {
        self.is_open = true;
        self.query.clear();
    }

    pub fn set_query(&mut self, query: &str) {
        if self.is_open {
            self.query = query.to_string();
        }
    }

    /// Close the menu without selecting anything. Returns false if it was already closed.
    pub fn dismiss(&mut self, reason: MenuDismissal) -> bool {
        if !self.is_open {
            return false;
        }
        debug!("Add menu dismissed via {:?}", reason);
        self.close();
        true
    }

    /// Close after an entry was picked or a form was submitted
    pub fn close(&mut self) {
        self.is_open = false;
        self.query.clear();
    }

    /// Catalog entries matching the current query; empty while closed
    pub fn filtered_entries<'a>(&self, catalog: &'a IconCatalog) -> Vec<&'a IconCatalogEntry> {
        if !self.is_open {
            return Vec::new();
        }
        catalog.search(&self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_filter() {
        let catalog = IconCatalog::default();
        let mut menu = AddMenuState::new();

        assert!(menu.filtered_entries(&catalog).is_empty());

        menu.open();
        assert_eq!(menu.filtered_entries(&catalog).len(), catalog.entries().len());

        menu.set_query("cof");
        let entries = menu.filtered_entries(&catalog);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "coffee");
    }

    #[test]
    fn test_dismiss_clears_state() {
        let mut menu = AddMenuState::new();
        menu.open();
        menu.set_query("rent");

        assert!(menu.dismiss(MenuDismissal::Escape));
        assert!(!menu.is_open());
        assert_eq!(menu.query(), "");

        assert!(!menu.dismiss(MenuDismissal::OutsideClick));
    }

    #[test]
    fn test_query_ignored_while_closed() {
        let mut menu = AddMenuState::new();
        menu.set_query("rent");
        assert_eq!(menu.query(), "");
    }
}
