//! Calculation pipeline for the five-year plan.
//!
//! Each stage is a pure function from typed inputs to a typed result plus
//! an audit step. The orchestration layer runs them in dependency order:
//! enrollment, revenue, facility costs, staffing costs, income statement,
//! balance sheets, cash flow, and the funding check.

pub mod balance_sheet;
pub mod cash_flow;
pub mod enrollment;
pub mod facility_cost;
pub mod funding;
pub mod income_statement;
pub mod percent;
pub mod revenue;
pub mod staffing_cost;

pub use balance_sheet::{BalanceSheetResult, build_balance_sheet};
pub use cash_flow::{CashFlowResult, build_cash_flow};
pub use enrollment::{EnrollmentProjection, project_enrollment};
pub use facility_cost::{
    FacilityCostResult, calculate_facility_costs, equipment_depreciation_rate, reception_rate,
};
pub use funding::{FundingCheckResult, check_funding};
pub use income_statement::{IncomeStatementResult, build_income_statement};
pub use percent::{format_euro, format_percent};
pub use revenue::{RevenueResult, calculate_revenue};
pub use staffing_cost::{
    Headcounts, StaffingCostResult, calculate_staffing_costs, derive_headcounts,
};
