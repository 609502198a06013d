//! Expense tracker service: the single state object the UI talks to.
//!
//! Owns the current `ItemStore` and replaces it wholesale on every change,
//! together with the ID generator, the drag tracker, the add menu and the
//! pending delete confirmation. The UI receives this object explicitly; there
//! is no global state.

use anyhow::Result;
use chrono::Local;
use shared::{
    CustomExpenseRequest, DataTableRow, ExpenseItem, ExpenseSummary, ExpenseTrackerConfig,
    IconCatalogEntry, Position, TableRowRequest,
};
use tracing::{debug, info, warn};

use crate::domain::{
    add_menu::{AddMenuState, MenuDismissal},
    aggregation::AggregationEngine,
    data_table::DataTableService,
    drag_tracker::DragRepositionTracker,
    grid_placement::GridPlacementEngine,
    icon_catalog::IconCatalog,
    item_store::{parse_field_update, ItemStore},
    models::{format_creation_date, generate_color, parse_amount, ExpenseError, ItemIdGenerator},
};

/// Icon used for quick-added and custom items without one
const DEFAULT_ICON: &str = "💸";

/// Fields of a new item before it receives an ID, date and position
struct NewExpense {
    name: String,
    icon: String,
    amount: f64,
    category: Option<String>,
    color: String,
}

pub struct ExpenseTrackerService {
    config: ExpenseTrackerConfig,
    catalog: IconCatalog,
    placement: GridPlacementEngine,
    aggregation: AggregationEngine,
    table: DataTableService,
    store: ItemStore,
    ids: ItemIdGenerator,
    drag: DragRepositionTracker,
    add_menu: AddMenuState,
    pending_delete: Option<String>,
    container_width: Option<f64>,
    /// Grid cells handed out so far; deletes never free a cell
    placed_count: usize,
}

impl ExpenseTrackerService {
    pub fn new(config: ExpenseTrackerConfig, catalog: IconCatalog) -> Self {
        Self {
            placement: GridPlacementEngine::with_config(config.layout.clone()),
            aggregation: AggregationEngine::with_bucket_key(config.bucket_key),
            table: DataTableService::with_currency_symbol(&config.currency_symbol),
            config,
            catalog,
            store: ItemStore::new(),
            ids: ItemIdGenerator::new(),
            drag: DragRepositionTracker::new(),
            add_menu: AddMenuState::new(),
            pending_delete: None,
            container_width: None,
            placed_count: 0,
        }
    }

    pub fn with_config(config: ExpenseTrackerConfig) -> Self {
        Self::new(config, IconCatalog::default())
    }

    pub fn config(&self) -> &ExpenseTrackerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &IconCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn items(&self) -> &[ExpenseItem] {
        self.store.items()
    }

    pub fn placement(&self) -> &GridPlacementEngine {
        &self.placement
    }

    /// Record the measured canvas width. Only affects items created afterwards.
    pub fn set_container_width(&mut self, container_width: Option<f64>) {
        self.container_width = container_width;
    }

    // --- creation -------------------------------------------------------

    /// Add the catalog entry `entry_id` with its default amount and color
    pub fn add_from_catalog(&mut self, entry_id: &str) -> Result<ExpenseItem, ExpenseError> {
        let entry = self
            .catalog
            .get(entry_id)
            .cloned()
            .ok_or_else(|| ExpenseError::UnknownCatalogEntry(entry_id.to_string()))?;

        let item = self.create_item(NewExpense {
            name: entry.label,
            icon: entry.icon,
            amount: entry.default_amount,
            category: Some(entry.category),
            color: entry.color,
        });
        self.add_menu.close();
        Ok(item)
    }

    /// Submit the custom expense form of the add menu
    pub fn add_custom(&mut self, request: CustomExpenseRequest) -> Result<ExpenseItem, ExpenseError> {
        let (name, amount) = self.validate_new_expense(&request.name, &request.amount_input)?;

        let item = self.create_item(NewExpense {
            name,
            icon: request
                .icon
                .filter(|icon| !icon.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ICON.to_string()),
            amount,
            category: request.category,
            color: generate_color(),
        });
        self.add_menu.close();
        Ok(item)
    }

    /// Submit the inline row form of the data table
    pub fn add_table_row(&mut self, request: TableRowRequest) -> Result<ExpenseItem, ExpenseError> {
        let (name, amount) = self.validate_new_expense(&request.name, &request.amount_input)?;

        Ok(self.create_item(NewExpense {
            name,
            icon: DEFAULT_ICON.to_string(),
            amount,
            category: request.category,
            color: generate_color(),
        }))
    }

    /// The landing page "+" button: adds "Item N" with a zero amount
    pub fn quick_add(&mut self) -> ExpenseItem {
        let name = format!("Item {}", self.store.len() + 1);
        self.create_item(NewExpense {
            name,
            icon: DEFAULT_ICON.to_string(),
            amount: 0.0,
            category: None,
            color: generate_color(),
        })
    }

    /// Validate name and amount of a form submission; returns the trimmed name and parsed amount
    pub fn validate_new_expense(&self, name: &str, amount_input: &str) -> Result<(String, f64), ExpenseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ExpenseError::EmptyName);
        }
        if name.chars().count() > self.config.max_name_length {
            return Err(ExpenseError::NameTooLong(name.chars().count()));
        }

        let amount = parse_amount(amount_input, &self.config.currency_symbol)?;
        if amount <= 0.0 {
            return Err(ExpenseError::AmountNotPositive);
        }

        Ok((name.to_string(), amount))
    }

    fn create_item(&mut self, new_expense: NewExpense) -> ExpenseItem {
        let category = new_expense
            .category
            .map(|category| category.trim().to_string())
            .filter(|category| !category.is_empty())
            .unwrap_or_else(|| self.config.default_category.clone());

        let item = ExpenseItem {
            id: self.ids.next_id(),
            name: new_expense.name,
            icon: new_expense.icon,
            amount: new_expense.amount,
            date: format_creation_date(Local::now().naive_local()),
            category,
            color: new_expense.color,
            position: self.placement.place(self.placed_count, self.container_width),
        };
        self.placed_count += 1;

        info!(
            "➕ Added expense {} '{}' ({}) at ({:.0}, {:.0})",
            item.id,
            item.name,
            self.table.format_amount(item.amount),
            item.position.x,
            item.position.y
        );
        self.store = self.store.add(item.clone());
        item
    }

    // --- editing --------------------------------------------------------

    /// Inline edit of one field. Returns Ok(false) when the item does not exist.
    pub fn edit_field(&mut self, item_id: &str, field: &str, raw_value: &str) -> Result<bool, ExpenseError> {
        let update = parse_field_update(field, raw_value, &self.config)?;
        let updated = self.store.update(item_id, update);

        if updated.same_collection(&self.store) {
            debug!("Edit of {} on {} changed nothing", field, item_id);
            return Ok(false);
        }

        info!("✏️ Updated {} of expense {}", field, item_id);
        self.store = updated;
        Ok(true)
    }

    // --- deletion -------------------------------------------------------

    /// First step of a delete: remember which item awaits confirmation
    pub fn request_delete(&mut self, item_id: &str) -> Result<(), ExpenseError> {
        if !self.store.contains(item_id) {
            return Err(ExpenseError::ItemNotFound(item_id.to_string()));
        }
        self.pending_delete = Some(item_id.to_string());
        Ok(())
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Apply the pending delete. Returns Ok(false) if the item vanished in the meantime.
    pub fn confirm_delete(&mut self) -> Result<bool, ExpenseError> {
        let item_id = self.pending_delete.take().ok_or(ExpenseError::NoPendingDelete)?;
        let remaining = self.store.remove(&item_id);

        if remaining.same_collection(&self.store) {
            warn!("Confirmed delete of {} found nothing to remove", item_id);
            return Ok(false);
        }

        info!("🗑️ Deleted expense {}", item_id);
        self.store = remaining;
        Ok(true)
    }

    // --- drag -----------------------------------------------------------

    pub fn start_drag(&mut self, item_id: &str, pointer: Position, container_origin: Position) -> bool {
        self.drag.begin(&self.store, item_id, pointer, container_origin)
    }

    pub fn drag_move(&mut self, pointer: Position, container_origin: Position) -> Option<Position> {
        self.drag.move_to(pointer, container_origin)
    }

    /// Release the pointer. Returns true when a new position was committed.
    pub fn end_drag(&mut self, pointer: Position, container_origin: Position) -> bool {
        let updated = self.drag.end(&self.store, pointer, container_origin);
        let committed = !updated.same_collection(&self.store);
        self.store = updated;
        committed
    }

    pub fn drag_tracker(&self) -> &DragRepositionTracker {
        &self.drag
    }

    /// Position to draw an item at, including an in-progress drag preview
    pub fn display_position(&self, item: &ExpenseItem) -> Position {
        self.drag.display_position(item)
    }

    // --- add menu -------------------------------------------------------

    pub fn open_add_menu(&mut self) {
        self.add_menu.open();
    }

    pub fn search_add_menu(&mut self, query: &str) -> Vec<&IconCatalogEntry> {
        self.add_menu.set_query(query);
        self.add_menu.filtered_entries(&self.catalog)
    }

    pub fn dismiss_add_menu(&mut self, reason: MenuDismissal) -> bool {
        self.add_menu.dismiss(reason)
    }

    pub fn add_menu(&self) -> &AddMenuState {
        &self.add_menu
    }

    // --- derived views --------------------------------------------------

    pub fn summary(&self) -> ExpenseSummary {
        self.aggregation.summarize(self.store.items())
    }

    pub fn data_table(&self) -> Vec<DataTableRow> {
        self.table.rows(self.store.items())
    }

    pub fn export_csv(&self) -> Result<String> {
        self.table.to_csv(self.store.items())
    }
}

impl Default for ExpenseTrackerService {
    fn default() -> Self {
        Self::with_config(ExpenseTrackerConfig::default())
    }
}
