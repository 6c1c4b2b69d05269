//! HTTP request handlers for the planning engine API.
//!
//! This module contains the handler for the `/plan` endpoint and the
//! pipeline orchestration that runs every stage in dependency order.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    build_balance_sheet, build_cash_flow, build_income_statement, calculate_facility_costs,
    calculate_revenue, calculate_staffing_costs, check_funding, project_enrollment,
};
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, AuditWarning, PlanResult, PlanTotals};

use super::request::{PlanInputs, PlanRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/plan", post(plan_handler))
        .with_state(state)
}

/// Handler for POST /plan endpoint.
///
/// Accepts a plan request and returns the fully derived business plan.
async fn plan_handler(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing plan request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let config = state.config().config();

    // Validate the request against the configured bounds and defaults
    let inputs = match request.resolve(config) {
        Ok(inputs) => inputs,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Plan request rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            return (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response();
        }
    };

    match perform_plan(inputs) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                plan_id = %result.plan_id,
                warnings = result.audit_trace.warnings.len(),
                duration_us = result.audit_trace.duration_us,
                "Plan derived successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Plan derivation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Runs the full pipeline on validated inputs.
///
/// Stage order is fixed by the data dependencies: enrollment feeds revenue
/// and staffing, facility costs depend only on areas, the income statement
/// combines the three schedules, the balance sheets read the statement,
/// the cash flow reads both snapshots, and the funding check is free-standing.
fn perform_plan(inputs: PlanInputs) -> EngineResult<PlanResult> {
    let start_time = Instant::now();
    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let enrollment = project_enrollment(&inputs.new_first_year, step_number);
    audit_steps.push(enrollment.audit_step);
    step_number += 1;

    let revenue = calculate_revenue(&enrollment.matrix, &inputs.tuition, step_number);
    audit_steps.push(revenue.audit_step);
    step_number += 1;

    let facility_costs = calculate_facility_costs(&inputs.areas_m2, &inputs.facility, step_number);
    audit_steps.push(facility_costs.audit_step);
    step_number += 1;

    let staffing = calculate_staffing_costs(
        &enrollment.matrix.totals(),
        &inputs.staffing,
        inputs.staffing_overrides.as_ref(),
        step_number,
    );
    audit_steps.push(staffing.audit_step);
    step_number += 1;

    let income = build_income_statement(
        &revenue.schedule,
        &facility_costs.schedule,
        &staffing.schedule,
        step_number,
    );
    audit_steps.push(income.audit_step);
    step_number += 1;

    let mut balance_sheets = Vec::with_capacity(inputs.balance_overrides.len());
    for (year_index, overrides) in inputs.balance_overrides.iter().enumerate() {
        let result = build_balance_sheet(
            year_index,
            &income.statement,
            overrides,
            &inputs.balance,
            step_number,
        );
        audit_steps.push(result.audit_step);
        warnings.extend(result.warning);
        balance_sheets.push(result.sheet);
        step_number += 1;
    }

    let cash_flow = build_cash_flow(
        balance_sheets.first(),
        balance_sheets.get(1),
        Some(&income.statement),
        step_number,
    )?;
    audit_steps.push(cash_flow.audit_step);
    step_number += 1;

    let funding = match inputs.funding {
        Some(plan) => {
            let result = check_funding(&plan, step_number);
            audit_steps.push(result.audit_step);
            Some(result.check)
        }
        None => None,
    };

    let totals = PlanTotals {
        revenue: income
            .statement
            .years
            .iter()
            .map(|y| y.revenue_total)
            .collect(),
        costs: income.statement.years.iter().map(|y| y.cost_total).collect(),
        net_result: income.statement.years.iter().map(|y| y.net_result).collect(),
    };

    let duration_us = start_time.elapsed().as_micros() as u64;

    Ok(PlanResult {
        plan_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        enrollment: enrollment.matrix,
        revenue: revenue.schedule,
        facility_costs: facility_costs.schedule,
        staffing: staffing.schedule,
        income_statement: income.statement,
        balance_sheets,
        cash_flow: cash_flow.statement,
        funding,
        totals,
        audit_trace: AuditTrace {
            steps: audit_steps,
            warnings,
            duration_us,
        },
    })
}
