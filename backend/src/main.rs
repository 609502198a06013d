use anyhow::{Context, Result};
use expense_tracker_backend::{config, ExpenseTrackerService, IconCatalog, MenuDismissal};
use shared::{CustomExpenseRequest, Position};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Scripted session against the engine: add a few expenses the three ways the
/// UI can, drag one of them, then print the summary and data table.
fn main() -> Result<()> {
    let config = config::load_config_from_env().context("Failed to load configuration")?;

    // Initialize logging
    let default_level = if config.enable_debug_logging { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Setting up expense tracker");
    let mut service = ExpenseTrackerService::new(config, IconCatalog::default());
    service.set_container_width(Some(620.0));

    service.quick_add();

    service.open_add_menu();
    let matches = service.search_add_menu("re");
    info!("🔎 Add menu search 're' matched {} entries", matches.len());
    service.add_from_catalog("rent")?;

    service.open_add_menu();
    service.add_custom(CustomExpenseRequest {
        name: "Dining".to_string(),
        amount_input: "100".to_string(),
        icon: Some("🍽️".to_string()),
        category: Some("Food".to_string()),
    })?;

    service.open_add_menu();
    service.dismiss_add_menu(MenuDismissal::Escape);

    let origin = Position::new(0.0, 0.0);
    if let Some(dragged) = service.items().get(1).cloned() {
        let grab = dragged.position + Position::new(10.0, 10.0);
        service.start_drag(&dragged.id, grab, origin);
        service.drag_move(grab + Position::new(60.0, 30.0), origin);
        service.end_drag(grab + Position::new(120.0, 60.0), origin);
    }

    let summary = service.summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    print!("{}", service.export_csv()?);

    Ok(())
}
