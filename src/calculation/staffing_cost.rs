//! Staffing cost calculation functionality.
//!
//! Headcounts are derived from total enrollment via a students-per-teacher
//! ratio with structural minimums for the start-up years, then priced with
//! the configured salaries. Manual per-year overrides replace the derived
//! counts when supplied.

use rust_decimal::Decimal;

use crate::PLAN_YEARS;
use crate::config::StaffingConfig;
use crate::models::{AuditStep, HeadcountOverride, StaffingSchedule, StaffingYear};

use super::percent::format_euro;

/// The result of the staffing cost calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct StaffingCostResult {
    /// The five-year staffing schedule.
    pub schedule: StaffingSchedule,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Derived teacher headcounts for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Headcounts {
    /// Hired teachers.
    pub hired: u32,
    /// Contract teachers.
    pub contracted: u32,
}

/// Derives the teacher headcounts for a 1-based plan year.
///
/// - `hired = students / ratio` (integer division), floored to the
///   configured minimum for years 1 and 2.
/// - The remainder of students not covered by hired teachers adds one
///   contract teacher on top of the year's baseline when positive;
///   otherwise the baseline alone applies (baseline 1/2/1 for years
///   1/2/later by default).
pub fn derive_headcounts(students: u32, year: u32, staffing: &StaffingConfig) -> Headcounts {
    let ratio = staffing.students_per_hired_teacher.max(1);
    let mut hired = students / ratio;

    let contract_minimum = match year {
        1 => {
            hired = hired.max(staffing.hired_floor_year_1);
            staffing.contract_minimum_year_1
        }
        2 => {
            hired = hired.max(staffing.hired_floor_year_2);
            staffing.contract_minimum_year_2
        }
        _ => staffing.contract_minimum_later,
    };

    let remainder = students.saturating_sub(hired * ratio);
    let contracted = if remainder > 0 {
        contract_minimum.max(1)
    } else {
        contract_minimum
    };

    Headcounts { hired, contracted }
}

/// Calculates the per-year staffing schedule.
///
/// Per year: cost = hired × hired_salary + contracted × contract_salary +
/// admin_salary. A manual override for a year replaces the derived counts,
/// mirroring the plan's manual-override mode.
///
/// # Example
///
/// ```no_run
/// use plan_engine::calculation::calculate_staffing_costs;
/// use plan_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/schoolplan").unwrap();
/// let result =
///     calculate_staffing_costs(&[10, 22, 36, 52, 70], loader.config().staffing(), None, 4);
/// assert_eq!(result.schedule.years[4].hired, 8);
/// ```
pub fn calculate_staffing_costs(
    students_per_year: &[u32; PLAN_YEARS],
    staffing: &StaffingConfig,
    overrides: Option<&[HeadcountOverride; PLAN_YEARS]>,
    step_number: u32,
) -> StaffingCostResult {
    let mut years = Vec::with_capacity(PLAN_YEARS);

    for (year_index, &students) in students_per_year.iter().enumerate() {
        let year = (year_index + 1) as u32;
        let derived = derive_headcounts(students, year, staffing);

        let manual = overrides.map(|o| o[year_index]).unwrap_or_default();
        let hired = manual.hired.unwrap_or(derived.hired);
        let contracted = manual.contracted.unwrap_or(derived.contracted);

        let hired_cost = Decimal::from(hired) * staffing.hired_salary;
        let contract_cost = Decimal::from(contracted) * staffing.contract_salary;
        let total = hired_cost + contract_cost + staffing.admin_salary;

        years.push(StaffingYear {
            year,
            students,
            hired,
            contracted,
            hired_cost,
            contract_cost,
            admin_cost: staffing.admin_salary,
            total,
        });
    }

    let schedule = StaffingSchedule { years };
    let headcounts: Vec<(u32, u32)> = schedule
        .years
        .iter()
        .map(|y| (y.hired, y.contracted))
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "staffing_cost_calculation".to_string(),
        rule_name: "Staffing Cost Calculation".to_string(),
        input: serde_json::json!({
            "students_per_year": students_per_year,
            "students_per_hired_teacher": staffing.students_per_hired_teacher,
            "manual_overrides": overrides.is_some(),
        }),
        output: serde_json::json!({
            "headcounts_per_year": headcounts,
            "total_per_year": schedule
                .years
                .iter()
                .map(|y| y.total.normalize().to_string())
                .collect::<Vec<_>>(),
        }),
        reasoning: format!(
            "One hired teacher per {} students with start-up floors; year-1 personnel {}",
            staffing.students_per_hired_teacher,
            format_euro(schedule.total(0))
        ),
    };

    StaffingCostResult {
        schedule,
        audit_step,
    }
}
