//! Enrollment projection functionality.
//!
//! This module turns the per-year new-intake vector into the full
//! 5-year × 5-grade enrollment matrix via cohort promotion: each grade in
//! a given year holds the previous grade's count from the year before.

use crate::models::{AuditStep, EnrollmentMatrix, Grade};
use crate::{GRADES, PLAN_YEARS};

/// The result of an enrollment projection, including the audit step.
#[derive(Debug, Clone)]
pub struct EnrollmentProjection {
    /// The projected enrollment matrix.
    pub matrix: EnrollmentMatrix,
    /// The audit step recording this projection.
    pub audit_step: AuditStep,
}

/// Projects the 5×5 enrollment matrix from the new first-year intake.
///
/// For 0-based year `i`, the first grade equals `new_first[i]`; every later
/// grade equals the previous grade's count in year `i - 1`, zero when there
/// is no prior year. Inputs are pre-clamped to non-negative by the boundary
/// layer, so there are no error conditions.
///
/// # Example
///
/// ```
/// use plan_engine::calculation::project_enrollment;
/// use plan_engine::models::Grade;
///
/// let projection = project_enrollment(&[10, 12, 14, 16, 18], 1);
/// assert_eq!(projection.matrix.total(0), 10);
/// assert_eq!(projection.matrix.total(4), 70);
/// assert_eq!(projection.matrix.count(4, Grade::Fifth), 10);
/// ```
pub fn project_enrollment(new_first: &[u32; PLAN_YEARS], step_number: u32) -> EnrollmentProjection {
    let mut counts = [[0u32; GRADES]; PLAN_YEARS];

    for year_index in 0..PLAN_YEARS {
        for grade in Grade::ALL {
            counts[year_index][grade.position()] = match grade.previous() {
                None => new_first[year_index],
                Some(previous) => {
                    if year_index == 0 {
                        0
                    } else {
                        counts[year_index - 1][previous.position()]
                    }
                }
            };
        }
    }

    let matrix = EnrollmentMatrix::new(counts);
    let totals = matrix.totals();

    let audit_step = AuditStep {
        step_number,
        rule_id: "enrollment_projection".to_string(),
        rule_name: "Enrollment Projection".to_string(),
        input: serde_json::json!({
            "new_first_year_students": new_first,
        }),
        output: serde_json::json!({
            "totals_per_year": totals,
        }),
        reasoning: format!(
            "Promoted each cohort one grade per year; totals per year: {:?}",
            totals
        ),
    };

    EnrollmentProjection { matrix, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // ENR-001: default intake matches the worked example
    // ==========================================================================
    #[test]
    fn test_enr_001_default_intake_worked_example() {
        let projection = project_enrollment(&[10, 12, 14, 16, 18], 1);
        let matrix = &projection.matrix;

        assert_eq!(matrix.grade_row(0), [10, 0, 0, 0, 0]);
        assert_eq!(matrix.total(0), 10);
        assert_eq!(matrix.grade_row(4), [18, 16, 14, 12, 10]);
        assert_eq!(matrix.total(4), 70);
    }

    // ==========================================================================
    // ENR-002: promotion invariant holds for every year and grade
    // ==========================================================================
    #[test]
    fn test_enr_002_promotion_invariant() {
        let projection = project_enrollment(&[7, 0, 23, 5, 11], 1);
        let matrix = &projection.matrix;

        for year_index in 1..PLAN_YEARS {
            for grade in Grade::ALL {
                if let Some(previous) = grade.previous() {
                    assert_eq!(
                        matrix.count(year_index, grade),
                        matrix.count(year_index - 1, previous),
                        "promotion broken at year {} grade {:?}",
                        year_index + 1,
                        grade
                    );
                }
            }
        }
    }

    // ==========================================================================
    // ENR-003: year 1 has no promoted students
    // ==========================================================================
    #[test]
    fn test_enr_003_first_year_upper_grades_empty() {
        let projection = project_enrollment(&[30, 30, 30, 30, 30], 1);
        let matrix = &projection.matrix;

        for grade in Grade::ALL {
            if grade.previous().is_some() {
                assert_eq!(matrix.count(0, grade), 0);
            }
        }
    }

    // ==========================================================================
    // ENR-004: zero intake everywhere yields an empty school
    // ==========================================================================
    #[test]
    fn test_enr_004_zero_intake() {
        let projection = project_enrollment(&[0, 0, 0, 0, 0], 1);
        assert_eq!(projection.matrix.totals(), [0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_audit_step_records_totals() {
        let projection = project_enrollment(&[10, 12, 14, 16, 18], 3);

        assert_eq!(projection.audit_step.step_number, 3);
        assert_eq!(projection.audit_step.rule_id, "enrollment_projection");
        assert_eq!(
            projection.audit_step.output["totals_per_year"],
            serde_json::json!([10, 22, 36, 52, 70])
        );
    }
}
