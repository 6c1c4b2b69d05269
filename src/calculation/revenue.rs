//! Revenue calculation functionality.
//!
//! Revenue comes solely from the flat annual fee applied to every enrolled
//! student, plus flat annual contributions. The calculation is a pure
//! function of the enrollment matrix and the tuition parameters.

use rust_decimal::Decimal;

use crate::config::TuitionConfig;
use crate::models::{AuditStep, EnrollmentMatrix, Grade, RevenueSchedule, RevenueYear};
use crate::{GRADES, PLAN_YEARS};

use super::percent::format_euro;

/// The result of the revenue calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct RevenueResult {
    /// The five-year revenue schedule.
    pub schedule: RevenueSchedule,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the per-year revenue schedule.
///
/// Per year: each grade contributes `count × annual_fee`; the yearly total
/// is the sum across grades plus `annual_contributions`. Pure function, no
/// side effects, no error paths.
///
/// # Example
///
/// ```
/// use plan_engine::calculation::{calculate_revenue, project_enrollment};
/// use plan_engine::config::TuitionConfig;
/// use rust_decimal::Decimal;
///
/// let tuition = TuitionConfig {
///     annual_fee: Decimal::from(10000),
///     annual_contributions: Decimal::ZERO,
///     default_new_first_year: vec![10, 12, 14, 16, 18],
/// };
/// let matrix = project_enrollment(&[10, 12, 14, 16, 18], 1).matrix;
/// let result = calculate_revenue(&matrix, &tuition, 2);
/// assert_eq!(result.schedule.total(0), Decimal::from(100000));
/// assert_eq!(result.schedule.total(4), Decimal::from(700000));
/// ```
pub fn calculate_revenue(
    matrix: &EnrollmentMatrix,
    tuition: &TuitionConfig,
    step_number: u32,
) -> RevenueResult {
    let mut years = Vec::with_capacity(PLAN_YEARS);

    for year_index in 0..PLAN_YEARS {
        let mut by_grade = [Decimal::ZERO; GRADES];
        let mut tuition_total = Decimal::ZERO;

        for grade in Grade::ALL {
            let revenue = Decimal::from(matrix.count(year_index, grade)) * tuition.annual_fee;
            by_grade[grade.position()] = revenue;
            tuition_total += revenue;
        }

        years.push(RevenueYear {
            year: (year_index + 1) as u32,
            by_grade,
            tuition_total,
            contributions: tuition.annual_contributions,
            total: tuition_total + tuition.annual_contributions,
        });
    }

    let schedule = RevenueSchedule { years };
    let totals: Vec<String> = schedule
        .years
        .iter()
        .map(|y| y.total.normalize().to_string())
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "revenue_calculation".to_string(),
        rule_name: "Revenue Calculation".to_string(),
        input: serde_json::json!({
            "annual_fee": tuition.annual_fee.normalize().to_string(),
            "annual_contributions": tuition.annual_contributions.normalize().to_string(),
            "enrollment_totals": matrix.totals(),
        }),
        output: serde_json::json!({
            "revenue_per_year": totals,
        }),
        reasoning: format!(
            "Applied fee {} per student plus contributions {} per year",
            format_euro(tuition.annual_fee),
            format_euro(tuition.annual_contributions)
        ),
    };

    RevenueResult {
        schedule,
        audit_step,
    }
}
