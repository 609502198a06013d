//! # Domain Module
//!
//! Business logic of the expense tracker, independent of any UI framework.
//!
//! ## Module Organization
//!
//! - **item_store**: Immutable-update collection of expense items
//! - **grid_placement**: Initial grid position of newly created items
//! - **drag_tracker**: Drag state machine producing preview and committed positions
//! - **aggregation**: Totals, per-key buckets and chart-ready percentages
//! - **icon_catalog**: Read-only catalog of predefined expenses
//! - **add_menu**: Open/search/dismiss state of the add menu
//! - **data_table**: CSV-style data view and CSV export
//! - **expense_service**: The state object that ties everything together
//!
//! ## Business Rules
//!
//! - Items are created with a name, a positive amount and a grid position
//! - Category falls back to "Uncategorized" and is never empty
//! - Only one item can be dragged at a time; pointer moves never touch the store
//! - Deleting an item requires a confirmation step
//! - Percentages are rounded to one decimal and are 0 when the total is 0

pub mod add_menu;
pub mod aggregation;
pub mod data_table;
pub mod drag_tracker;
pub mod expense_service;
pub mod grid_placement;
pub mod icon_catalog;
pub mod item_store;
pub mod models;

pub use add_menu::*;
pub use aggregation::*;
pub use data_table::*;
pub use drag_tracker::*;
pub use expense_service::*;
pub use grid_placement::*;
pub use icon_catalog::*;
pub use item_store::*;
pub use models::*;
