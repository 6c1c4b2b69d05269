//! Balance sheet builder.
//!
//! Builds one snapshot per tracked year. Derived lines are fixed ratios of
//! the income-statement totals; editable lines take the user-supplied
//! overrides (default zero). The assets-versus-liabilities identity is
//! checked and reported as a warning, never enforced.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::config::BalanceConfig;
use crate::models::{
    AuditStep, AuditWarning, BalanceEntry, BalanceLineCode, BalanceOverrides, BalanceSheet,
    IncomeStatement,
};

use super::percent::format_euro;

/// The result of a balance-sheet build, including the audit step and the
/// identity warning when the snapshot does not square.
#[derive(Debug, Clone)]
pub struct BalanceSheetResult {
    /// The populated snapshot.
    pub sheet: BalanceSheet,
    /// The audit step recording this build.
    pub audit_step: AuditStep,
    /// Warning raised when total assets differ from liabilities plus equity.
    pub warning: Option<AuditWarning>,
}

/// Builds the balance-sheet snapshot for a 0-based tracked year index.
///
/// Derived lines per year `i`:
/// - trade receivables = `receivables_pct_of_revenue × revenue(i)`
/// - tax receivables = `tax_receivables_pct_of_cost × cost(i)`
/// - trade payables = `cost(i) / trade_payables_cost_divisor`
/// - social-security payables = `social_security_pct_of_personnel × personnel(i)`
/// - tax payables = `tax_payables_pct_of_revenue × revenue(i)`
/// - severance = `severance_pct_of_personnel × Σ personnel(0..=i)`
/// - net result = income-statement net result for year `i`
/// - cash = `max(0, initial_cash − Σ losses through year i)`
///
/// Every other leaf is editable and takes its override value, default zero.
pub fn build_balance_sheet(
    year_index: usize,
    income: &IncomeStatement,
    overrides: &BalanceOverrides,
    balance: &BalanceConfig,
    step_number: u32,
) -> BalanceSheetResult {
    let year_values = income.year(year_index);
    let revenue = year_values.revenue_total;
    let cost = year_values.cost_total;
    let personnel = year_values.personnel;

    let cumulative_personnel: Decimal = income.years[..=year_index]
        .iter()
        .map(|y| y.personnel)
        .sum();
    let cumulative_losses: Decimal = income.years[..=year_index]
        .iter()
        .filter(|y| y.net_result.is_sign_negative())
        .map(|y| -y.net_result)
        .sum();
    let cash = (balance.initial_cash - cumulative_losses).max(Decimal::ZERO);

    let mut entries: BTreeMap<BalanceLineCode, BalanceEntry> = BTreeMap::new();
    for code in BalanceLineCode::ALL {
        let entry = if code.is_computed() {
            let value = match code {
                BalanceLineCode::TradeReceivables => balance.receivables_pct_of_revenue * revenue,
                BalanceLineCode::TaxReceivables => balance.tax_receivables_pct_of_cost * cost,
                BalanceLineCode::TradePayables => cost / balance.trade_payables_cost_divisor,
                BalanceLineCode::SocialSecurityPayables => {
                    balance.social_security_pct_of_personnel * personnel
                }
                BalanceLineCode::TaxPayables => balance.tax_payables_pct_of_revenue * revenue,
                BalanceLineCode::Severance => {
                    balance.severance_pct_of_personnel * cumulative_personnel
                }
                BalanceLineCode::NetResult => year_values.net_result,
                BalanceLineCode::Cash => cash,
                // is_computed() covers exactly the arms above.
                _ => unreachable!("line {:?} is not computed", code),
            };
            BalanceEntry::Computed(value)
        } else {
            BalanceEntry::Editable(overrides.get(code))
        };
        entries.insert(code, entry);
    }

    let sheet = BalanceSheet {
        year: (year_index + 1) as u32,
        entries,
    };

    let warning = if sheet.is_balanced() {
        None
    } else {
        Some(AuditWarning {
            code: "BALANCE_NOT_SQUARE".to_string(),
            message: format!(
                "Year {} balance sheet does not square: assets {} vs liabilities and equity {}",
                sheet.year,
                format_euro(sheet.total_assets()),
                format_euro(sheet.total_liabilities_and_equity())
            ),
            severity: "medium".to_string(),
        })
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "balance_sheet_build".to_string(),
        rule_name: "Balance Sheet Build".to_string(),
        input: serde_json::json!({
            "year": sheet.year,
            "revenue": revenue.normalize().to_string(),
            "cost": cost.normalize().to_string(),
            "personnel": personnel.normalize().to_string(),
            "initial_cash": balance.initial_cash.normalize().to_string(),
        }),
        output: serde_json::json!({
            "total_assets": sheet.total_assets().normalize().to_string(),
            "total_liabilities_and_equity": sheet
                .total_liabilities_and_equity()
                .normalize()
                .to_string(),
            "balanced": sheet.is_balanced(),
        }),
        reasoning: format!(
            "Derived year-{} snapshot from statement totals; assets {}",
            sheet.year,
            format_euro(sheet.total_assets())
        ),
    };

    BalanceSheetResult {
        sheet,
        audit_step,
        warning,
    }
}
