//! Cash-flow builder.
//!
//! Derives the cash-flow statement from the two tracked balance-sheet
//! snapshots and the year-2 income-statement values. This is the one stage
//! with an explicit precondition: it fails fast when either snapshot or
//! the income statement is absent.
//!
//! Sign convention: an increase in an asset is a cash outflow (negative
//! delta), an increase in a liability or equity line is a cash inflow
//! (positive delta). Deltas are oriented year-1-minus-year-2 for assets
//! and year-2-minus-year-1 for liabilities, with beginning liquidity taken
//! from the year-2 snapshot, so the chain closes by construction.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, BalanceLineCode, BalanceSheet, CashFlowLine, CashFlowStatement, IncomeStatement,
};

use super::percent::format_euro;

/// The result of the cash-flow build, including the audit step.
#[derive(Debug, Clone)]
pub struct CashFlowResult {
    /// The derived cash-flow statement.
    pub statement: CashFlowStatement,
    /// The audit step recording this build.
    pub audit_step: AuditStep,
}

fn asset_delta(year1: &BalanceSheet, year2: &BalanceSheet, code: BalanceLineCode) -> Decimal {
    year1.value(code) - year2.value(code)
}

fn liability_delta(year1: &BalanceSheet, year2: &BalanceSheet, code: BalanceLineCode) -> Decimal {
    year2.value(code) - year1.value(code)
}

/// Builds the cash-flow statement between the two tracked years.
///
/// Computes five cumulative subtotals in strict order, each building on
/// the previous:
/// 1. operating cash flow = operating result + depreciation add-back
/// 2. potential working-capital flow = (1) + financial + extraordinary +
///    fiscal results
/// 3. earnings-based cash flow = (2) + working-capital deltas
/// 4. net company cash flow = (3) + investment and financing deltas
/// 5. ending liquidity = beginning liquidity + (4)
///
/// # Errors
///
/// Returns [`EngineError::MissingStatement`] when either balance-sheet
/// snapshot or the income statement has not been computed.
pub fn build_cash_flow(
    year1: Option<&BalanceSheet>,
    year2: Option<&BalanceSheet>,
    income: Option<&IncomeStatement>,
    step_number: u32,
) -> EngineResult<CashFlowResult> {
    let year1 = year1.ok_or_else(|| EngineError::MissingStatement {
        statement: "balance sheet year 1".to_string(),
    })?;
    let year2 = year2.ok_or_else(|| EngineError::MissingStatement {
        statement: "balance sheet year 2".to_string(),
    })?;
    let income = income.ok_or_else(|| EngineError::MissingStatement {
        statement: "income statement".to_string(),
    })?;
    if income.years.len() < 2 {
        return Err(EngineError::MissingStatement {
            statement: "income statement year 2".to_string(),
        });
    }

    let values = income.year(1);
    let mut lines = Vec::new();

    // 1. Operating cash flow.
    let operating_cash_flow = values.operating_result + values.depreciation;
    lines.push(CashFlowLine::item("Operating result", values.operating_result));
    lines.push(CashFlowLine::item("Depreciation add-back", values.depreciation));
    lines.push(CashFlowLine::subtotal("Operating cash flow", operating_cash_flow));

    // 2. Potential working-capital flow.
    let fiscal_result = -values.taxes;
    let potential_working_capital_flow =
        operating_cash_flow + values.financial_result + fiscal_result;
    lines.push(CashFlowLine::item("Financial result", values.financial_result));
    lines.push(CashFlowLine::item("Extraordinary result", Decimal::ZERO));
    lines.push(CashFlowLine::item("Fiscal result", fiscal_result));
    lines.push(CashFlowLine::subtotal(
        "Potential working-capital flow",
        potential_working_capital_flow,
    ));

    // 3. Earnings-based cash flow: working-capital deltas.
    let working_capital: [(&str, Decimal); 9] = [
        (
            "Inventory change",
            asset_delta(year1, year2, BalanceLineCode::Inventory),
        ),
        (
            "Trade receivables change",
            asset_delta(year1, year2, BalanceLineCode::TradeReceivables),
        ),
        (
            "Other receivables change",
            asset_delta(year1, year2, BalanceLineCode::OtherReceivables),
        ),
        (
            "Current financial assets change",
            asset_delta(year1, year2, BalanceLineCode::CurrentFinancialAssets),
        ),
        (
            "Accrued income change",
            asset_delta(year1, year2, BalanceLineCode::AccruedIncome),
        ),
        (
            "Accrued liabilities change",
            liability_delta(year1, year2, BalanceLineCode::AccruedLiabilities),
        ),
        (
            "Trade payables change",
            liability_delta(year1, year2, BalanceLineCode::TradePayables),
        ),
        (
            "Other payables change",
            liability_delta(year1, year2, BalanceLineCode::OtherPayables),
        ),
        (
            "Tax payables change",
            liability_delta(year1, year2, BalanceLineCode::TaxPayables),
        ),
    ];
    let mut earnings_cash_flow = potential_working_capital_flow;
    for (label, delta) in working_capital {
        earnings_cash_flow += delta;
        lines.push(CashFlowLine::item(label, delta));
    }
    lines.push(CashFlowLine::subtotal(
        "Earnings-based cash flow",
        earnings_cash_flow,
    ));

    // 4. Net company cash flow: investment and financing deltas.
    let tangible_delta = asset_delta(year1, year2, BalanceLineCode::Buildings)
        + asset_delta(year1, year2, BalanceLineCode::Plant)
        + asset_delta(year1, year2, BalanceLineCode::Equipment)
        + asset_delta(year1, year2, BalanceLineCode::Furniture);
    let equity_delta = liability_delta(year1, year2, BalanceLineCode::ShareCapital)
        + liability_delta(year1, year2, BalanceLineCode::Reserves)
        + liability_delta(year1, year2, BalanceLineCode::NetResult);
    let investing_financing: [(&str, Decimal); 6] = [
        (
            "Intangible fixed assets change",
            asset_delta(year1, year2, BalanceLineCode::IntangibleAssets),
        ),
        ("Tangible fixed assets change", tangible_delta),
        (
            "Financial fixed assets change",
            asset_delta(year1, year2, BalanceLineCode::FinancialAssets),
        ),
        (
            "Severance fund change",
            liability_delta(year1, year2, BalanceLineCode::Severance),
        ),
        (
            "Other funds change",
            liability_delta(year1, year2, BalanceLineCode::OtherFunds),
        ),
        ("Equity change", equity_delta),
    ];
    let mut net_company_cash_flow = earnings_cash_flow;
    for (label, delta) in investing_financing {
        net_company_cash_flow += delta;
        lines.push(CashFlowLine::item(label, delta));
    }
    lines.push(CashFlowLine::subtotal(
        "Net company cash flow",
        net_company_cash_flow,
    ));

    // 5. Ending liquidity.
    let beginning_liquidity = year2.total_liquidity();
    let ending_liquidity = beginning_liquidity + net_company_cash_flow;
    lines.push(CashFlowLine::item("Beginning liquidity", beginning_liquidity));
    lines.push(CashFlowLine::item("Ending liquidity", ending_liquidity));

    let statement = CashFlowStatement {
        lines,
        operating_cash_flow,
        potential_working_capital_flow,
        earnings_cash_flow,
        net_company_cash_flow,
        beginning_liquidity,
        ending_liquidity,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "cash_flow_build".to_string(),
        rule_name: "Cash Flow Build".to_string(),
        input: serde_json::json!({
            "operating_result": values.operating_result.normalize().to_string(),
            "depreciation": values.depreciation.normalize().to_string(),
            "beginning_liquidity": beginning_liquidity.normalize().to_string(),
        }),
        output: serde_json::json!({
            "operating_cash_flow": operating_cash_flow.normalize().to_string(),
            "net_company_cash_flow": net_company_cash_flow.normalize().to_string(),
            "ending_liquidity": ending_liquidity.normalize().to_string(),
        }),
        reasoning: format!(
            "Net company cash flow {} on beginning liquidity {}",
            format_euro(net_company_cash_flow),
            format_euro(beginning_liquidity)
        ),
    };

    Ok(CashFlowResult {
        statement,
        audit_step,
    })
}
