//! CSV-style data view of the current expenses.
//!
//! Formats items into display rows (in display order) and exports the same
//! rows as CSV text for copy/paste. Nothing is written to disk.

use anyhow::{Context, Result};
use csv::Writer;
use shared::{DataTableRow, ExpenseItem};

#[derive(Debug, Clone)]
pub struct DataTableService {
    currency_symbol: String,
}

impl DataTableService {
    pub fn new() -> Self {
        Self::with_currency_symbol("$")
    }

    pub fn with_currency_symbol(currency_symbol: &str) -> Self {
        Self {
            currency_symbol: currency_symbol.to_string(),
        }
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }

    pub fn format_row(&self, item: &ExpenseItem) -> DataTableRow {
        DataTableRow {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            formatted_amount: self.format_amount(item.amount),
            date: item.date.clone(),
        }
    }

    pub fn rows(&self, items: &[ExpenseItem]) -> Vec<DataTableRow> {
        items.iter().map(|item| self.format_row(item)).collect()
    }

    /// Render the table as CSV with an `ID,Name,Category,Amount,Date` header
    pub fn to_csv(&self, items: &[ExpenseItem]) -> Result<String> {
        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(["ID", "Name", "Category", "Amount", "Date"])?;

        for row in self.rows(items) {
            writer.write_record([
                row.id.as_str(),
                row.name.as_str(),
                row.category.as_str(),
                row.formatted_amount.as_str(),
                row.date.as_str(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e))?;
        String::from_utf8(bytes).context("CSV output was not valid UTF-8")
    }
}

impl Default for DataTableService {
    fn default() -> Self {
        Self::new()
    }
}
