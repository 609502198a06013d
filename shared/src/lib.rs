use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Category assigned to items created without one
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Pixel coordinates of an item's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, other: Position) -> Position {
        Position::new(self.x - other.x, self.y - other.y)
    }
}

/// A single expense record. ID format: "expense::<epoch_millis>::<sequence>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub id: String,
    /// Display label, also the default grouping key for charts
    pub name: String,
    /// Emoji or icon identifier
    pub icon: String,
    /// Non-negative amount spent
    pub amount: f64,
    /// Creation timestamp, formatted once when the item is created
    pub date: String,
    /// Never empty; falls back to `DEFAULT_CATEGORY`
    pub category: String,
    /// Display color as "#rrggbb"
    pub color: String,
    /// Committed position on the canvas
    pub position: Position,
}

/// Typed replacement of a single item field. `id` is intentionally not editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldUpdate {
    Name(String),
    Icon(String),
    Amount(f64),
    Date(String),
    Category(String),
    Color(String),
    Position(Position),
}

impl FieldUpdate {
    /// Field name as used by inline edit forms
    pub fn field_name(&self) -> &'static str {
        match self {
            FieldUpdate::Name(_) => "name",
            FieldUpdate::Icon(_) => "icon",
            FieldUpdate::Amount(_) => "amount",
            FieldUpdate::Date(_) => "date",
            FieldUpdate::Category(_) => "category",
            FieldUpdate::Color(_) => "color",
            FieldUpdate::Position(_) => "position",
        }
    }
}

/// One entry of the read-only icon catalog shown in the add menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconCatalogEntry {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub default_amount: f64,
    pub color: String,
    pub category: String,
}

/// Custom expense form submission (the "Custom" tab of the add menu)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomExpenseRequest {
    pub name: String,
    /// Raw amount input, e.g. "12.50" or "$1,200"
    pub amount_input: String,
    pub icon: Option<String>,
    pub category: Option<String>,
}

/// Inline row form at the bottom of the data table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRowRequest {
    pub name: String,
    pub amount_input: String,
    pub category: Option<String>,
}

/// Aggregate of all items sharing a grouping key. Derived on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub key: String,
    pub total: f64,
    pub count: usize,
    /// Icon of the first item seen for this key
    pub icon: String,
    /// Color of the first item seen for this key
    pub color: String,
    /// Share of the grand total, rounded to one decimal (0 when the total is 0)
    pub percentage: f64,
}

/// Slice of the pie chart, expressed as cumulative percentages for a conic gradient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSegment {
    pub key: String,
    pub color: String,
    pub start_percent: f64,
    pub end_percent: f64,
}

/// Bar of the bar chart; `ratio` is relative to the largest bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarDatum {
    pub key: String,
    pub color: String,
    pub total: f64,
    pub ratio: f64,
}

/// Everything the summary tab renders, recomputed from the full item list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total: f64,
    pub count: usize,
    pub average: f64,
    pub largest: Option<ExpenseItem>,
    /// Ordered by descending total, ties in first-seen order
    pub buckets: Vec<CategoryBucket>,
    pub pie_segments: Vec<PieSegment>,
    pub bars: Vec<BarDatum>,
}

/// A row of the CSV-style data view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTableRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub formatted_amount: String,
    pub date: String,
}

/// Key used to group items into chart buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKey {
    /// Group by display name (what the charts have always shown)
    #[default]
    Name,
    /// Group by the category field
    Category,
}

/// Grid placement constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub cell_size: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    /// Column count used while the container width is still unknown
    pub default_columns: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_size: 200.0,
            padding_x: 20.0,
            padding_y: 100.0,
            default_columns: 3,
        }
    }
}

/// Configuration for the expense tracker engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseTrackerConfig {
    pub layout: LayoutConfig,
    pub default_category: String,
    pub bucket_key: BucketKey,
    pub max_name_length: usize,
    pub currency_symbol: String,
    pub enable_debug_logging: bool,
}

impl Default for ExpenseTrackerConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            default_category: DEFAULT_CATEGORY.to_string(),
            bucket_key: BucketKey::Name,
            max_name_length: 256,
            currency_symbol: "$".to_string(),
            enable_debug_logging: false,
        }
    }
}

impl ExpenseItem {
    /// Generate an item ID from creation time and a per-generator sequence number
    pub fn generate_id(epoch_millis: u64, sequence: u64) -> String {
        format!("expense::{}::{}", epoch_millis, sequence)
    }

    /// Parse an item ID into (epoch_millis, sequence)
    pub fn parse_id(id: &str) -> Result<(u64, u64), ExpenseIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 3 || parts[0] != "expense" {
            return Err(ExpenseIdError::InvalidFormat);
        }

        let epoch_millis = parts[1]
            .parse::<u64>()
            .map_err(|_| ExpenseIdError::InvalidTimestamp)?;
        let sequence = parts[2]
            .parse::<u64>()
            .map_err(|_| ExpenseIdError::InvalidSequence)?;

        Ok((epoch_millis, sequence))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseIdError {
    InvalidFormat,
    InvalidTimestamp,
    InvalidSequence,
}

impl fmt::Display for ExpenseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseIdError::InvalidFormat => write!(f, "Invalid expense ID format"),
            ExpenseIdError::InvalidTimestamp => write!(f, "Invalid timestamp in expense ID"),
            ExpenseIdError::InvalidSequence => write!(f, "Invalid sequence in expense ID"),
        }
    }
}

impl std::error::Error for ExpenseIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_expense_id() {
        assert_eq!(
            ExpenseItem::generate_id(1702516122000, 0),
            "expense::1702516122000::0"
        );
        assert_eq!(
            ExpenseItem::generate_id(1702516122000, 7),
            "expense::1702516122000::7"
        );
    }

    #[test]
    fn test_parse_expense_id() {
        let (millis, sequence) = ExpenseItem::parse_id("expense::1702516122000::3").unwrap();
        assert_eq!(millis, 1702516122000);
        assert_eq!(sequence, 3);

        assert_eq!(
            ExpenseItem::parse_id("expense::1702516122000"),
            Err(ExpenseIdError::InvalidFormat)
        );
        assert_eq!(
            ExpenseItem::parse_id("transaction::1::2"),
            Err(ExpenseIdError::InvalidFormat)
        );
        assert_eq!(
            ExpenseItem::parse_id("expense::abc::2"),
            Err(ExpenseIdError::InvalidTimestamp)
        );
        assert_eq!(
            ExpenseItem::parse_id("expense::1::x"),
            Err(ExpenseIdError::InvalidSequence)
        );
    }

    #[test]
    fn test_position_arithmetic() {
        let pointer = Position::new(150.0, 240.0);
        let corner = Position::new(100.0, 200.0);

        assert_eq!(pointer - corner, Position::new(50.0, 40.0));
        assert_eq!(corner + Position::new(50.0, 40.0), pointer);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(FieldUpdate::Amount(1.0).field_name(), "amount");
        assert_eq!(FieldUpdate::Position(Position::default()).field_name(), "position");
        assert_eq!(FieldUpdate::Category(String::new()).field_name(), "category");
    }

    #[test]
    fn test_config_defaults() {
        let config = ExpenseTrackerConfig::default();
        assert_eq!(config.layout.cell_size, 200.0);
        assert_eq!(config.layout.padding_x, 20.0);
        assert_eq!(config.layout.padding_y, 100.0);
        assert_eq!(config.layout.default_columns, 3);
        assert_eq!(config.default_category, "Uncategorized");
        assert_eq!(config.bucket_key, BucketKey::Name);
    }

    #[test]
    fn test_partial_config_json_uses_defaults() {
        let config: ExpenseTrackerConfig =
            serde_json::from_str(r#"{"bucket_key":"category","layout":{"cell_size":150.0}}"#).unwrap();

        assert_eq!(config.bucket_key, BucketKey::Category);
        assert_eq!(config.layout.cell_size, 150.0);
        assert_eq!(config.layout.padding_y, 100.0);
        assert_eq!(config.currency_symbol, "$");
    }
}
