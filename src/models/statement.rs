//! Income statement models.
//!
//! The income statement is rendered as an ordered list of multi-year line
//! items. Comparable lines carry a percentage column relative to either the
//! revenue total or the cost total; subtotal and result lines suppress it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Selects the denominator for a line's percentage column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentBase {
    /// Percentage of the year's total revenue.
    Revenue,
    /// Percentage of the year's total cost.
    Cost,
}

/// A single ordered line of the income statement, one value per plan year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// Display label for the line.
    pub label: String,
    /// One value per plan year, in year order.
    pub values: Vec<Decimal>,
    /// Whether the line is a highlighted subtotal row.
    pub is_subtotal: bool,
    /// Percentage denominator, or `None` for non-comparable lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_base: Option<PercentBase>,
    /// Formatted percentage per year ("0%" on a zero denominator);
    /// absent for non-comparable lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percents: Option<Vec<String>>,
}

/// The named value set of one income-statement year.
///
/// The ordered [`StatementLine`] list is derived from these values; the
/// downstream balance-sheet and cash-flow builders read them directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementYear {
    /// The 1-based plan year.
    pub year: u32,
    /// Tuition revenue.
    pub revenue_tuition: Decimal,
    /// Annual contributions.
    pub revenue_contributions: Decimal,
    /// Other income (placeholder, zero).
    pub revenue_other: Decimal,
    /// Total production value.
    pub revenue_total: Decimal,
    /// Personnel cost.
    pub personnel: Decimal,
    /// Revenue minus personnel cost; no percentage column.
    pub first_operating_margin: Decimal,
    /// Raw materials and supplies (placeholder, zero).
    pub raw_materials: Decimal,
    /// Third-party asset leases (placeholder, zero).
    pub leases: Decimal,
    /// Services: facility cost net of depreciation.
    pub services: Decimal,
    /// Depreciation carve-out of the facility cost.
    pub depreciation: Decimal,
    /// Total production cost.
    pub cost_total: Decimal,
    /// Revenue total minus cost total.
    pub operating_result: Decimal,
    /// Total financial income and charges (placeholder, zero).
    pub financial_result: Decimal,
    /// Result before taxes.
    pub result_before_taxes: Decimal,
    /// Taxes (placeholder, zero).
    pub taxes: Decimal,
    /// Net result for the year.
    pub net_result: Decimal,
}

/// The complete five-year income statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Named values per plan year, in year order.
    pub years: Vec<IncomeStatementYear>,
    /// The ordered display lines with percentage columns.
    pub lines: Vec<StatementLine>,
}

impl IncomeStatement {
    /// The value set for a 0-based year index.
    pub fn year(&self, year_index: usize) -> &IncomeStatementYear {
        &self.years[year_index]
    }
}
