//! Facility cost calculation functionality.
//!
//! Every facility cost line is `floor area × per-m² rate`. Two rates are
//! year-dependent: equipment depreciation ramps up by a fixed increment
//! each year, and the reception rate steps down once the school moves to
//! the larger site after year 2.

use rust_decimal::Decimal;

use crate::PLAN_YEARS;
use crate::config::FacilityConfig;
use crate::models::{AuditStep, FacilityCostSchedule, FacilityCostYear};

use super::percent::format_euro;

/// The result of the facility cost calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct FacilityCostResult {
    /// The five-year facility cost schedule.
    pub schedule: FacilityCostSchedule,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The effective equipment-depreciation rate for a 0-based year index.
pub fn equipment_depreciation_rate(facility: &FacilityConfig, year_index: usize) -> Decimal {
    facility.rates.equipment_depreciation_base
        + Decimal::from(year_index as u32) * facility.rates.equipment_depreciation_step
}

/// The effective reception rate for a 1-based plan year.
///
/// The first-two-years rate applies for year <= 2; the switch happens at
/// strictly year > 2.
pub fn reception_rate(facility: &FacilityConfig, year: u32) -> Decimal {
    if year <= 2 {
        facility.rates.reception_first_two_years
    } else {
        facility.rates.reception_later_years
    }
}

/// Calculates the per-year facility cost schedule.
///
/// Areas are assumed valid (at or above the configured minimum); the
/// boundary layer rejects anything smaller before this runs.
///
/// # Example
///
/// ```no_run
/// use plan_engine::calculation::calculate_facility_costs;
/// use plan_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/schoolplan").unwrap();
/// let result = calculate_facility_costs(&[200, 200, 500, 500, 500], loader.config().facility(), 3);
/// assert_eq!(result.schedule.years.len(), 5);
/// ```
pub fn calculate_facility_costs(
    areas_m2: &[u32; PLAN_YEARS],
    facility: &FacilityConfig,
    step_number: u32,
) -> FacilityCostResult {
    let rates = &facility.rates;
    let mut years = Vec::with_capacity(PLAN_YEARS);

    for (year_index, &area_m2) in areas_m2.iter().enumerate() {
        let year = (year_index + 1) as u32;
        let area = Decimal::from(area_m2);

        let building_maintenance = area * rates.building_maintenance;
        let plant_maintenance = area * rates.plant_maintenance;
        let electricity = area * rates.electricity;
        let gas = area * rates.gas;
        let water = area * rates.water;
        let cleaning = area * rates.cleaning;
        let furniture_depreciation = area * rates.furniture_depreciation;
        let equipment_depreciation = area * equipment_depreciation_rate(facility, year_index);
        let reception = area * reception_rate(facility, year);

        let total = building_maintenance
            + plant_maintenance
            + electricity
            + gas
            + water
            + cleaning
            + furniture_depreciation
            + equipment_depreciation
            + reception;

        years.push(FacilityCostYear {
            year,
            area_m2,
            building_maintenance,
            plant_maintenance,
            electricity,
            gas,
            water,
            cleaning,
            furniture_depreciation,
            equipment_depreciation,
            reception,
            total,
        });
    }

    let schedule = FacilityCostSchedule { years };
    let totals: Vec<String> = schedule
        .years
        .iter()
        .map(|y| y.total.normalize().to_string())
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "facility_cost_calculation".to_string(),
        rule_name: "Facility Cost Calculation".to_string(),
        input: serde_json::json!({
            "areas_m2": areas_m2,
        }),
        output: serde_json::json!({
            "total_per_year": totals,
        }),
        reasoning: format!(
            "Applied nine per-m² rates per year; year-1 total {}, year-{} total {}",
            format_euro(schedule.total(0)),
            PLAN_YEARS,
            format_euro(schedule.total(PLAN_YEARS - 1))
        ),
    };

    FacilityCostResult {
        schedule,
        audit_step,
    }
}
