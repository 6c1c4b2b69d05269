//! Integration tests for the planning engine.
//!
//! This test suite drives the `/plan` endpoint end to end and covers:
//! - Enrollment projection with the default and custom intakes
//! - Revenue, facility-cost and staffing schedules
//! - Income-statement closure and percentage columns
//! - Balance-sheet derivation and the identity warning
//! - Cash-flow chain identity
//! - Funding verdict boundaries
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use plan_engine::api::{AppState, create_router};
use plan_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/schoolplan").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Parses a Decimal out of a JSON string field.
fn decimal_field(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}

async fn post_plan(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/plan")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

// =============================================================================
// Enrollment and Schedules
// =============================================================================

#[tokio::test]
async fn test_default_enrollment_projection() {
    let (status, result) = post_plan(create_router_for_test(), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    // Cohorts promote one grade per year with no attrition.
    let counts = &result["enrollment"]["counts"];
    assert_eq!(counts[0], json!([10, 0, 0, 0, 0]));
    assert_eq!(counts[1], json!([12, 10, 0, 0, 0]));
    assert_eq!(counts[4], json!([18, 16, 14, 12, 10]));
}

#[tokio::test]
async fn test_revenue_follows_enrollment() {
    let (status, result) = post_plan(create_router_for_test(), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(decimal_field(&result["totals"]["revenue"][0]), decimal("100000"));
    assert_eq!(decimal_field(&result["totals"]["revenue"][4]), decimal("700000"));
}

#[tokio::test]
async fn test_facility_cost_worked_values() {
    let (status, result) = post_plan(create_router_for_test(), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let years = result["facility_costs"]["years"].as_array().unwrap();

    // Year 1 on 200 m².
    assert_eq!(decimal_field(&years[0]["cleaning"]), decimal("7686"));
    assert_eq!(decimal_field(&years[0]["reception"]), decimal("46116"));
    assert_eq!(decimal_field(&years[0]["total"]), decimal("64884"));

    // Year 3 on 500 m²: reception stepped down, equipment ramped twice.
    assert_eq!(decimal_field(&years[2]["reception"]), decimal("92230"));
    assert_eq!(
        decimal_field(&years[2]["equipment_depreciation"]),
        decimal("12750")
    );
    assert_eq!(decimal_field(&years[2]["total"]), decimal("147650"));
}

#[tokio::test]
async fn test_staffing_headcounts_and_costs() {
    let (status, result) = post_plan(create_router_for_test(), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let years = result["staffing"]["years"].as_array().unwrap();
    let headcounts: Vec<(u64, u64)> = years
        .iter()
        .map(|y| (y["hired"].as_u64().unwrap(), y["contracted"].as_u64().unwrap()))
        .collect();
    assert_eq!(headcounts, vec![(2, 1), (3, 2), (4, 1), (6, 1), (8, 1)]);

    assert_eq!(decimal_field(&years[0]["total"]), decimal("155000"));
    assert_eq!(decimal_field(&years[4]["total"]), decimal("395000"));
}

#[tokio::test]
async fn test_manual_headcount_override() {
    let body = json!({
        "staffing_overrides": [
            {"hired": 5, "contracted": 3},
            {}, {}, {}, {}
        ]
    });
    let (status, result) = post_plan(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::OK);

    let years = result["staffing"]["years"].as_array().unwrap();
    assert_eq!(years[0]["hired"], json!(5));
    assert_eq!(years[0]["contracted"], json!(3));
    // 5 × 40000 + 3 × 15000 + 60000.
    assert_eq!(decimal_field(&years[0]["total"]), decimal("305000"));
    // Untouched years keep the derived counts.
    assert_eq!(years[4]["hired"], json!(8));
}

#[tokio::test]
async fn test_rate_and_salary_overrides() {
    let body = json!({
        "facility_rates": {"cleaning": "40.00"},
        "hired_salary": "45000"
    });
    let (status, result) = post_plan(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::OK);

    let facility = result["facility_costs"]["years"].as_array().unwrap();
    assert_eq!(decimal_field(&facility[0]["cleaning"]), decimal("8000"));

    // Year 1: 2 hired at the overridden salary.
    let staffing = result["staffing"]["years"].as_array().unwrap();
    assert_eq!(decimal_field(&staffing[0]["hired_cost"]), decimal("90000"));
}

// =============================================================================
// Income Statement
// =============================================================================

#[tokio::test]
async fn test_income_statement_closure() {
    let (status, result) = post_plan(create_router_for_test(), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let years = result["income_statement"]["years"].as_array().unwrap();
    assert_eq!(years.len(), 5);
    for year in years {
        let revenue = decimal_field(&year["revenue_total"]);
        let cost = decimal_field(&year["cost_total"]);
        assert_eq!(decimal_field(&year["operating_result"]), revenue - cost);
        assert_eq!(decimal_field(&year["net_result"]), revenue - cost);
    }

    // Year 1: 100000 revenue against 155000 personnel and 64884 facility.
    assert_eq!(decimal_field(&years[0]["cost_total"]), decimal("219884"));
    assert_eq!(decimal_field(&years[0]["net_result"]), decimal("-119884"));
}

#[tokio::test]
async fn test_income_statement_percent_columns() {
    let (status, result) = post_plan(create_router_for_test(), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let lines = result["income_statement"]["lines"].as_array().unwrap();
    let total_value = lines
        .iter()
        .find(|l| l["label"] == "Total production value")
        .unwrap();
    assert_eq!(total_value["is_subtotal"], json!(true));
    for percent in total_value["percents"].as_array().unwrap() {
        assert_eq!(percent, &json!("100.0%"));
    }

    // Margin rows carry no percentage column at all.
    let margin = lines
        .iter()
        .find(|l| l["label"] == "First operating margin")
        .unwrap();
    assert!(margin.get("percents").is_none());
}

// =============================================================================
// Balance Sheet and Cash Flow
// =============================================================================

#[tokio::test]
async fn test_balance_sheet_derived_lines() {
    let (status, result) = post_plan(create_router_for_test(), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let sheets = result["balance_sheets"].as_array().unwrap();
    assert_eq!(sheets.len(), 2);

    let year1 = &sheets[0]["entries"];
    assert_eq!(year1["CRED_CLIENTI"]["source"], json!("computed"));
    assert_eq!(
        decimal_field(&year1["CRED_CLIENTI"]["value"]),
        decimal("30000")
    );
    assert_eq!(
        decimal_field(&year1["DEB_FORNITORI"]["value"]),
        decimal("219884") / decimal("6")
    );
    // Cumulative loss exceeds the initial cash, so cash floors at zero.
    assert_eq!(decimal_field(&year1["CASSA"]["value"]), Decimal::ZERO);
    // Editable lines default to zero.
    assert_eq!(year1["CAPITALE_SOCIALE"]["source"], json!("editable"));
    assert_eq!(
        decimal_field(&year1["CAPITALE_SOCIALE"]["value"]),
        Decimal::ZERO
    );
}

#[tokio::test]
async fn test_unbalanced_sheet_raises_warning() {
    let (status, result) = post_plan(create_router_for_test(), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert!(
        warnings
            .iter()
            .any(|w| w["code"] == json!("BALANCE_NOT_SQUARE")),
        "expected an identity warning, got {:?}",
        warnings
    );
}

#[tokio::test]
async fn test_balance_override_flows_into_sheet() {
    let body = json!({
        "balance_overrides": [
            {"values": {"CAPITALE_SOCIALE": "200000", "IMM_ARREDI": "30000"}},
            {"values": {"CAPITALE_SOCIALE": "200000"}}
        ]
    });
    let (status, result) = post_plan(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::OK);

    let year1 = &result["balance_sheets"][0]["entries"];
    assert_eq!(
        decimal_field(&year1["CAPITALE_SOCIALE"]["value"]),
        decimal("200000")
    );
    assert_eq!(decimal_field(&year1["IMM_ARREDI"]["value"]), decimal("30000"));
}

#[tokio::test]
async fn test_cash_flow_chain_identity() {
    let (status, result) = post_plan(create_router_for_test(), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let cash_flow = &result["cash_flow"];
    let beginning = decimal_field(&cash_flow["beginning_liquidity"]);
    let ending = decimal_field(&cash_flow["ending_liquidity"]);
    let net = decimal_field(&cash_flow["net_company_cash_flow"]);
    assert_eq!(ending - beginning, net);

    let subtotals: Vec<&str> = cash_flow["lines"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|l| l["is_subtotal"] == json!(true))
        .map(|l| l["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        subtotals,
        vec![
            "Operating cash flow",
            "Potential working-capital flow",
            "Earnings-based cash flow",
            "Net company cash flow",
        ]
    );
}

// =============================================================================
// Funding Check
// =============================================================================

#[tokio::test]
async fn test_funding_verdict_boundaries() {
    for (capital, verdict, difference) in [
        (150_000u64, "shortfall", "-50000"),
        (200_000u64, "covered", "0"),
        (250_000u64, "surplus", "50000"),
    ] {
        let body = json!({
            "funding": {
                "uses": {"works_and_fit_out": 120000, "furniture": 30000, "working_capital_reserve": 50000},
                "sources": {"share_capital": capital}
            }
        });
        let (status, result) = post_plan(create_router_for_test(), body).await;
        assert_eq!(status, StatusCode::OK);

        let funding = &result["funding"];
        assert_eq!(funding["verdict"], json!(verdict), "capital {}", capital);
        assert_eq!(decimal_field(&funding["difference"]), decimal(difference));
        assert_eq!(decimal_field(&funding["total_uses"]), decimal("200000"));
    }
}

#[tokio::test]
async fn test_funding_absent_without_request() {
    let (status, result) = post_plan(create_router_for_test(), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(result.get("funding").is_none());
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/plan")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], json!("MALFORMED_JSON"));
}

#[tokio::test]
async fn test_wrong_length_intake_returns_400() {
    let body = json!({"new_first_year_students": [10, 12, 14]});
    let (status, error) = post_plan(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], json!("INVALID_PARAMETER"));
    assert!(
        error["message"]
            .as_str()
            .unwrap()
            .contains("new_first_year_students")
    );
}

#[tokio::test]
async fn test_area_below_minimum_returns_400() {
    let body = json!({"areas_m2": [200, 200, 40, 500, 500]});
    let (status, error) = post_plan(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], json!("INVALID_PARAMETER"));
    assert!(error["message"].as_str().unwrap().contains("40"));
}

#[tokio::test]
async fn test_derived_balance_line_override_returns_400() {
    let body = json!({
        "balance_overrides": [{"values": {"TFR": "5000"}}]
    });
    let (status, error) = post_plan(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], json!("INVALID_PARAMETER"));
    assert!(error["message"].as_str().unwrap().contains("TFR"));
}

#[tokio::test]
async fn test_zero_enrollment_still_returns_a_plan() {
    let body = json!({"new_first_year_students": [0, 0, 0, 0, 0]});
    let (status, result) = post_plan(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(decimal_field(&result["totals"]["revenue"][0]), Decimal::ZERO);
    // Structural staffing minimums still cost money with no students.
    let staffing = result["staffing"]["years"].as_array().unwrap();
    assert_eq!(staffing[0]["hired"], json!(2));
    assert_eq!(
        decimal_field(&staffing[0]["total"]),
        decimal("80000") + decimal("15000") + decimal("60000")
    );
}
