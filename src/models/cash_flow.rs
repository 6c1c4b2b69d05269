//! Cash-flow statement models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single ordered line of the cash-flow statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowLine {
    /// Display label for the line.
    pub label: String,
    /// The line value: a copy from the income statement or a signed
    /// balance-sheet delta.
    pub value: Decimal,
    /// Whether the line is a highlighted subtotal row.
    pub is_subtotal: bool,
}

impl CashFlowLine {
    /// A plain (non-subtotal) line.
    pub fn item(label: impl Into<String>, value: Decimal) -> Self {
        Self {
            label: label.into(),
            value,
            is_subtotal: false,
        }
    }

    /// A highlighted subtotal line.
    pub fn subtotal(label: impl Into<String>, value: Decimal) -> Self {
        Self {
            label: label.into(),
            value,
            is_subtotal: true,
        }
    }
}

/// The derived cash-flow statement between the two tracked balance years.
///
/// The five named subtotals are cumulative: each builds on the previous
/// one, so `ending_liquidity - beginning_liquidity` equals
/// `net_company_cash_flow` by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    /// Ordered display lines, subtotal rows included.
    pub lines: Vec<CashFlowLine>,
    /// Operating result plus depreciation add-back.
    pub operating_cash_flow: Decimal,
    /// Operating cash flow plus financial, extraordinary and fiscal results.
    pub potential_working_capital_flow: Decimal,
    /// Potential flow plus the working-capital deltas.
    pub earnings_cash_flow: Decimal,
    /// Earnings flow plus the investment and financing deltas.
    pub net_company_cash_flow: Decimal,
    /// Liquid assets at the start of the flow.
    pub beginning_liquidity: Decimal,
    /// Beginning liquidity plus the net company cash flow.
    pub ending_liquidity: Decimal,
}
