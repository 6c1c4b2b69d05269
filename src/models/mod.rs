//! Core data models for the planning engine.
//!
//! This module contains all the domain models used throughout the engine.

mod balance;
mod cash_flow;
mod enrollment;
mod funding;
mod plan_result;
mod schedules;
mod statement;

pub use balance::{
    BalanceEntry, BalanceLineCode, BalanceOverrides, BalanceSheet, TRACKED_BALANCE_YEARS,
};
pub use cash_flow::{CashFlowLine, CashFlowStatement};
pub use enrollment::{EnrollmentMatrix, Grade};
pub use funding::{FundingCheck, FundingPlan, FundingVerdict, SourceOfFunds, UseOfFunds};
pub use plan_result::{AuditStep, AuditTrace, AuditWarning, PlanResult, PlanTotals};
pub use schedules::{
    FacilityCostSchedule, FacilityCostYear, HeadcountOverride, RevenueSchedule, RevenueYear,
    StaffingSchedule, StaffingYear,
};
pub use statement::{IncomeStatement, IncomeStatementYear, PercentBase, StatementLine};
