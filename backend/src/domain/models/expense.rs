//! Domain helpers for creating expense items: ID generation, colors,
//! creation timestamps, amount parsing and the domain error type.
use chrono::{NaiveDateTime, Utc};
use shared::ExpenseItem;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpenseError {
    #[error("Please enter a name")]
    EmptyName,
    #[error("Name is too long ({0} characters)")]
    NameTooLong(usize),
    #[error("Please enter an amount")]
    EmptyAmount,
    #[error("Please enter a valid amount (like 5 or 5.00): {0}")]
    InvalidAmountFormat(String),
    #[error("Amount must be greater than 0")]
    AmountNotPositive,
    #[error("Amount cannot be negative")]
    NegativeAmount,
    #[error("Unknown catalog entry '{0}'")]
    UnknownCatalogEntry(String),
    #[error("Unknown field '{0}'")]
    UnknownField(String),
    #[error("Field '{0}' cannot be edited")]
    ReadOnlyField(String),
    #[error("Position must look like \"x,y\": {0}")]
    InvalidPosition(String),
    #[error("Expense '{0}' not found")]
    ItemNotFound(String),
    #[error("No delete is waiting for confirmation")]
    NoPendingDelete,
}

/// Hands out unique item IDs.
///
/// IDs embed the creation time like every other ID in the app, but a
/// monotonic sequence is appended so two items created within the same
/// millisecond never collide.
#[derive(Debug, Default)]
pub struct ItemIdGenerator {
    next_sequence: u64,
}

impl ItemIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        let now_millis = Utc::now().timestamp_millis().max(0) as u64;
        self.next_id_at(now_millis)
    }

    pub fn next_id_at(&mut self, epoch_millis: u64) -> String {
        let id = ExpenseItem::generate_id(epoch_millis, self.next_sequence);
        self.next_sequence += 1;
        id
    }
}

/// Random "#rrggbb" color for custom entries that have no catalog color
pub fn generate_color() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    format!("#{:02x}{:02x}{:02x}", bytes[0], bytes[1], bytes[2])
}

/// Format the creation timestamp shown in the data view, e.g. "6/13/2025, 2:05:09 PM"
pub fn format_creation_date(created_at: NaiveDateTime) -> String {
    created_at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Clean and parse an amount typed by the user ("$1,200.50" -> 1200.5)
pub fn parse_amount(amount_input: &str, currency_symbol: &str) -> Result<f64, ExpenseError> {
    let mut cleaned = amount_input.trim().replace([',', ' '], "");
    if !currency_symbol.is_empty() {
        cleaned = cleaned.replace(currency_symbol, "");
    }

    if cleaned.is_empty() {
        return Err(ExpenseError::EmptyAmount);
    }

    let amount = cleaned
        .parse::<f64>()
        .map_err(|e| ExpenseError::InvalidAmountFormat(e.to_string()))?;

    if !amount.is_finite() {
        return Err(ExpenseError::InvalidAmountFormat(format!("{} is not a finite number", cleaned)));
    }

    Ok(amount)
}
