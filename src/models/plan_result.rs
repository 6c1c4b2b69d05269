//! Plan result models for the planning engine.
//!
//! This module contains the [`PlanResult`] type and its associated
//! structures that capture all outputs of a full pipeline run, including
//! every derived statement and the audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::balance::BalanceSheet;
use super::cash_flow::CashFlowStatement;
use super::enrollment::EnrollmentMatrix;
use super::funding::FundingCheck;
use super::schedules::{FacilityCostSchedule, RevenueSchedule, StaffingSchedule};
use super::statement::IncomeStatement;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the stage that ran.
    pub rule_id: String,
    /// The human-readable name of the stage.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the derivation.
    pub reasoning: String,
}

/// A warning generated during a pipeline run.
///
/// Warnings indicate potential issues that don't prevent computation
/// but may require attention, such as an out-of-balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during the run.
    pub warnings: Vec<AuditWarning>,
    /// The total computation duration in microseconds.
    pub duration_us: u64,
}

/// Aggregated headline totals for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTotals {
    /// Total revenue per plan year.
    pub revenue: Vec<Decimal>,
    /// Total cost per plan year.
    pub costs: Vec<Decimal>,
    /// Net result per plan year.
    pub net_result: Vec<Decimal>,
}

/// The complete result of a business-plan derivation.
///
/// Captures every statement produced by the pipeline plus an audit trace
/// recording each stage's inputs, outputs and reasoning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    /// Unique identifier for this plan run.
    pub plan_id: Uuid,
    /// When the plan was computed.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// The projected 5×5 enrollment matrix.
    pub enrollment: EnrollmentMatrix,
    /// The revenue schedule.
    pub revenue: RevenueSchedule,
    /// The facility cost schedule.
    pub facility_costs: FacilityCostSchedule,
    /// The staffing schedule.
    pub staffing: StaffingSchedule,
    /// The five-year income statement.
    pub income_statement: IncomeStatement,
    /// Balance-sheet snapshots for the two tracked years.
    pub balance_sheets: Vec<BalanceSheet>,
    /// The cash-flow statement between the two tracked years.
    pub cash_flow: CashFlowStatement,
    /// The funding-requirement check, when funding items were supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding: Option<FundingCheck>,
    /// Headline totals per plan year.
    pub totals: PlanTotals,
    /// The complete audit trace.
    pub audit_trace: AuditTrace,
}
