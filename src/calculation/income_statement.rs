//! Income statement builder.
//!
//! A state-free transform combining the revenue, facility-cost and staffing
//! schedules into the civil-code profit-and-loss layout: revenue breakdown,
//! first operating margin, cost breakdown with the depreciation carve-out,
//! operating result, a zeroed financial section and the net result.

use rust_decimal::Decimal;

use crate::PLAN_YEARS;
use crate::models::{
    AuditStep, FacilityCostSchedule, IncomeStatement, IncomeStatementYear, PercentBase,
    RevenueSchedule, StaffingSchedule, StatementLine,
};

use super::percent::{format_euro, format_percent};

/// The result of the income statement build, including the audit step.
#[derive(Debug, Clone)]
pub struct IncomeStatementResult {
    /// The five-year income statement.
    pub statement: IncomeStatement,
    /// The audit step recording this build.
    pub audit_step: AuditStep,
}

fn build_line(
    years: &[IncomeStatementYear],
    label: &str,
    is_subtotal: bool,
    percent_base: Option<PercentBase>,
    extract: impl Fn(&IncomeStatementYear) -> Decimal,
) -> StatementLine {
    let values: Vec<Decimal> = years.iter().map(&extract).collect();
    let percents = percent_base.map(|base| {
        years
            .iter()
            .map(|year| {
                let denominator = match base {
                    PercentBase::Revenue => year.revenue_total,
                    PercentBase::Cost => year.cost_total,
                };
                format_percent(extract(year), denominator)
            })
            .collect()
    });

    StatementLine {
        label: label.to_string(),
        values,
        is_subtotal,
        percent_base,
        percents,
    }
}

/// Builds the five-year income statement.
///
/// Closure invariant: for every year, `operating_result` equals
/// `revenue_total - cost_total` exactly, and the net result equals the
/// operating result since the financial, extraordinary and tax sections
/// are held at zero.
pub fn build_income_statement(
    revenue: &RevenueSchedule,
    facility: &FacilityCostSchedule,
    staffing: &StaffingSchedule,
    step_number: u32,
) -> IncomeStatementResult {
    let mut years = Vec::with_capacity(PLAN_YEARS);

    for year_index in 0..PLAN_YEARS {
        let revenue_year = &revenue.years[year_index];
        let facility_year = &facility.years[year_index];
        let personnel = staffing.total(year_index);

        let revenue_total = revenue_year.total;
        let depreciation = facility_year.depreciation_total();
        let services = facility_year.total - depreciation;
        let raw_materials = Decimal::ZERO;
        let leases = Decimal::ZERO;
        let cost_total = personnel + raw_materials + leases + services + depreciation;
        let operating_result = revenue_total - cost_total;

        years.push(IncomeStatementYear {
            year: (year_index + 1) as u32,
            revenue_tuition: revenue_year.tuition_total,
            revenue_contributions: revenue_year.contributions,
            revenue_other: Decimal::ZERO,
            revenue_total,
            personnel,
            first_operating_margin: revenue_total - personnel,
            raw_materials,
            leases,
            services,
            depreciation,
            cost_total,
            operating_result,
            financial_result: Decimal::ZERO,
            result_before_taxes: operating_result,
            taxes: Decimal::ZERO,
            net_result: operating_result,
        });
    }

    let lines = vec![
        build_line(&years, "Tuition fees", false, Some(PercentBase::Revenue), |y| {
            y.revenue_tuition
        }),
        build_line(
            &years,
            "Annual contributions",
            false,
            Some(PercentBase::Revenue),
            |y| y.revenue_contributions,
        ),
        build_line(
            &years,
            "Other income",
            false,
            Some(PercentBase::Revenue),
            |y| y.revenue_other,
        ),
        build_line(
            &years,
            "Total production value",
            true,
            Some(PercentBase::Revenue),
            |y| y.revenue_total,
        ),
        build_line(
            &years,
            "Personnel costs",
            false,
            Some(PercentBase::Cost),
            |y| y.personnel,
        ),
        build_line(&years, "First operating margin", true, None, |y| {
            y.first_operating_margin
        }),
        build_line(
            &years,
            "Raw materials and supplies",
            false,
            Some(PercentBase::Cost),
            |y| y.raw_materials,
        ),
        build_line(
            &years,
            "Third-party asset leases",
            false,
            Some(PercentBase::Cost),
            |y| y.leases,
        ),
        build_line(&years, "Services", false, Some(PercentBase::Cost), |y| {
            y.services
        }),
        build_line(
            &years,
            "Depreciation and write-downs",
            false,
            Some(PercentBase::Cost),
            |y| y.depreciation,
        ),
        build_line(
            &years,
            "Total production costs",
            true,
            Some(PercentBase::Cost),
            |y| y.cost_total,
        ),
        build_line(&years, "Operating result", true, None, |y| {
            y.operating_result
        }),
        build_line(&years, "Income from equity investments", false, None, |_| {
            Decimal::ZERO
        }),
        build_line(&years, "Other financial income", false, None, |_| {
            Decimal::ZERO
        }),
        build_line(
            &years,
            "Interest and other financial charges",
            false,
            None,
            |_| Decimal::ZERO,
        ),
        build_line(
            &years,
            "Total financial income and charges",
            true,
            None,
            |y| y.financial_result,
        ),
        build_line(&years, "Result before taxes", true, None, |y| {
            y.result_before_taxes
        }),
        build_line(&years, "Taxes", false, None, |y| y.taxes),
        build_line(&years, "Net result", true, None, |y| y.net_result),
    ];

    let statement = IncomeStatement { years, lines };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_statement_build".to_string(),
        rule_name: "Income Statement Build".to_string(),
        input: serde_json::json!({
            "revenue_per_year": statement
                .years
                .iter()
                .map(|y| y.revenue_total.normalize().to_string())
                .collect::<Vec<_>>(),
            "cost_per_year": statement
                .years
                .iter()
                .map(|y| y.cost_total.normalize().to_string())
                .collect::<Vec<_>>(),
        }),
        output: serde_json::json!({
            "operating_result_per_year": statement
                .years
                .iter()
                .map(|y| y.operating_result.normalize().to_string())
                .collect::<Vec<_>>(),
        }),
        reasoning: format!(
            "Operating result per year from {} to {}",
            format_euro(statement.years[0].operating_result),
            format_euro(statement.years[PLAN_YEARS - 1].operating_result)
        ),
    };

    IncomeStatementResult {
        statement,
        audit_step,
    }
}
