//! Funding coverage check.
//!
//! Totals the uses and sources of funds and classifies the gap. Unlisted
//! items simply count as zero, so a partially filled plan still checks.

use rust_decimal::Decimal;

use crate::models::{AuditStep, FundingCheck, FundingPlan, FundingVerdict, SourceOfFunds, UseOfFunds};

use super::percent::format_euro;

/// The result of the funding check, including the audit step.
#[derive(Debug, Clone)]
pub struct FundingCheckResult {
    /// The computed coverage check.
    pub check: FundingCheck,
    /// The audit step recording this check.
    pub audit_step: AuditStep,
}

/// Checks whether the funding sources cover the planned uses.
///
/// `difference = total sources - total uses`; positive means surplus,
/// exactly zero means covered, negative means shortfall.
pub fn check_funding(plan: &FundingPlan, step_number: u32) -> FundingCheckResult {
    let total_uses: Decimal = UseOfFunds::ALL
        .iter()
        .map(|&item| Decimal::from(plan.use_amount(item)))
        .sum();
    let total_sources: Decimal = SourceOfFunds::ALL
        .iter()
        .map(|&item| Decimal::from(plan.source_amount(item)))
        .sum();
    let difference = total_sources - total_uses;

    let verdict = if difference > Decimal::ZERO {
        FundingVerdict::Surplus
    } else if difference == Decimal::ZERO {
        FundingVerdict::Covered
    } else {
        FundingVerdict::Shortfall
    };

    let check = FundingCheck {
        total_uses,
        total_sources,
        difference,
        verdict,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "funding_check".to_string(),
        rule_name: "Funding Check".to_string(),
        input: serde_json::json!({
            "uses": plan.uses,
            "sources": plan.sources,
        }),
        output: serde_json::json!({
            "total_uses": total_uses.normalize().to_string(),
            "total_sources": total_sources.normalize().to_string(),
            "difference": difference.normalize().to_string(),
            "verdict": verdict,
        }),
        reasoning: format!(
            "Sources {} against uses {}: {}",
            format_euro(total_sources),
            format_euro(total_uses),
            match verdict {
                FundingVerdict::Surplus => "surplus",
                FundingVerdict::Covered => "exactly covered",
                FundingVerdict::Shortfall => "shortfall",
            }
        ),
    };

    FundingCheckResult { check, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_plan(capital: u64) -> FundingPlan {
        let mut plan = FundingPlan::default();
        plan.uses.insert(UseOfFunds::WorksAndFitOut, 120_000);
        plan.uses.insert(UseOfFunds::Furniture, 30_000);
        plan.uses.insert(UseOfFunds::WorkingCapitalReserve, 50_000);
        plan.sources.insert(SourceOfFunds::ShareCapital, capital);
        plan
    }

    // ==========================================================================
    // FUN-001: shortfall when sources fall short of uses
    // ==========================================================================
    #[test]
    fn test_fun_001_shortfall() {
        let result = check_funding(&sample_plan(150_000), 1);

        assert_eq!(result.check.total_uses, dec("200000"));
        assert_eq!(result.check.total_sources, dec("150000"));
        assert_eq!(result.check.difference, dec("-50000"));
        assert_eq!(result.check.verdict, FundingVerdict::Shortfall);
    }

    // ==========================================================================
    // FUN-002: exact coverage is its own verdict, not a surplus
    // ==========================================================================
    #[test]
    fn test_fun_002_exact_coverage() {
        let result = check_funding(&sample_plan(200_000), 1);

        assert_eq!(result.check.difference, Decimal::ZERO);
        assert_eq!(result.check.verdict, FundingVerdict::Covered);
    }

    // ==========================================================================
    // FUN-003: any positive difference is a surplus
    // ==========================================================================
    #[test]
    fn test_fun_003_surplus() {
        let result = check_funding(&sample_plan(200_001), 1);

        assert_eq!(result.check.difference, dec("1"));
        assert_eq!(result.check.verdict, FundingVerdict::Surplus);
    }

    // ==========================================================================
    // FUN-004: unlisted items count as zero
    // ==========================================================================
    #[test]
    fn test_fun_004_empty_plan_is_covered() {
        let result = check_funding(&FundingPlan::default(), 1);

        assert_eq!(result.check.total_uses, Decimal::ZERO);
        assert_eq!(result.check.total_sources, Decimal::ZERO);
        assert_eq!(result.check.verdict, FundingVerdict::Covered);
    }

    #[test]
    fn test_audit_step_records_verdict() {
        let result = check_funding(&sample_plan(150_000), 9);

        assert_eq!(result.audit_step.step_number, 9);
        assert_eq!(result.audit_step.rule_id, "funding_check");
        assert_eq!(
            result.audit_step.output["verdict"],
            serde_json::json!(FundingVerdict::Shortfall)
        );
    }
}
