//! Request types for the planning engine API.
//!
//! This module defines the JSON request structure for the `/plan` endpoint
//! and its validation against the loaded configuration. Every field is
//! optional; anything not supplied falls back to the configured defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PLAN_YEARS;
use crate::config::{BalanceConfig, FacilityConfig, PlanConfig, StaffingConfig, TuitionConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{BalanceOverrides, FundingPlan, HeadcountOverride, TRACKED_BALANCE_YEARS};

/// Request body for the `/plan` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanRequest {
    /// New first-year student intake per plan year. Defaults to the
    /// configured intake.
    #[serde(default)]
    pub new_first_year_students: Option<Vec<u32>>,
    /// Floor area per plan year in m². Defaults to the configured areas.
    #[serde(default)]
    pub areas_m2: Option<Vec<u32>>,
    /// Override for the flat annual fee per student.
    #[serde(default)]
    pub annual_fee: Option<Decimal>,
    /// Override for the flat annual contributions.
    #[serde(default)]
    pub annual_contributions: Option<Decimal>,
    /// Override for the initial cash available to the balance sheet.
    #[serde(default)]
    pub initial_cash: Option<Decimal>,
    /// Overrides for individual per-m² facility rates.
    #[serde(default)]
    pub facility_rates: Option<FacilityRateOverrides>,
    /// Override for the annual cost of a hired teacher.
    #[serde(default)]
    pub hired_salary: Option<Decimal>,
    /// Override for the annual cost of a contract teacher.
    #[serde(default)]
    pub contract_salary: Option<Decimal>,
    /// Override for the fixed administrative staff cost.
    #[serde(default)]
    pub admin_salary: Option<Decimal>,
    /// Manual teacher headcounts per plan year, replacing the derived ones.
    #[serde(default)]
    pub staffing_overrides: Option<Vec<HeadcountOverride>>,
    /// Editable balance-sheet values, one entry per tracked year in order.
    #[serde(default)]
    pub balance_overrides: Vec<BalanceOverrides>,
    /// Funding uses and sources; the coverage check runs only when present.
    #[serde(default)]
    pub funding: Option<FundingPlan>,
}

/// Partial override of the per-m² facility rates.
///
/// Only the rates present replace the configured ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacilityRateOverrides {
    /// Building maintenance per m².
    #[serde(default)]
    pub building_maintenance: Option<Decimal>,
    /// Plant and systems maintenance per m².
    #[serde(default)]
    pub plant_maintenance: Option<Decimal>,
    /// Electricity per m².
    #[serde(default)]
    pub electricity: Option<Decimal>,
    /// Gas supply per m².
    #[serde(default)]
    pub gas: Option<Decimal>,
    /// Water per m².
    #[serde(default)]
    pub water: Option<Decimal>,
    /// Cleaning per m².
    #[serde(default)]
    pub cleaning: Option<Decimal>,
    /// Furniture depreciation per m².
    #[serde(default)]
    pub furniture_depreciation: Option<Decimal>,
    /// Equipment depreciation per m² in year 1.
    #[serde(default)]
    pub equipment_depreciation_base: Option<Decimal>,
    /// Yearly increment of the equipment depreciation rate per m².
    #[serde(default)]
    pub equipment_depreciation_step: Option<Decimal>,
    /// Reception rate per m² for years 1 and 2.
    #[serde(default)]
    pub reception_first_two_years: Option<Decimal>,
    /// Reception rate per m² from year 3 onwards.
    #[serde(default)]
    pub reception_later_years: Option<Decimal>,
}

impl FacilityRateOverrides {
    fn apply(&self, facility: &mut FacilityConfig) -> EngineResult<()> {
        let rates = &mut facility.rates;
        let overrides = [
            ("building_maintenance", self.building_maintenance, &mut rates.building_maintenance),
            ("plant_maintenance", self.plant_maintenance, &mut rates.plant_maintenance),
            ("electricity", self.electricity, &mut rates.electricity),
            ("gas", self.gas, &mut rates.gas),
            ("water", self.water, &mut rates.water),
            ("cleaning", self.cleaning, &mut rates.cleaning),
            (
                "furniture_depreciation",
                self.furniture_depreciation,
                &mut rates.furniture_depreciation,
            ),
            (
                "equipment_depreciation_base",
                self.equipment_depreciation_base,
                &mut rates.equipment_depreciation_base,
            ),
            (
                "equipment_depreciation_step",
                self.equipment_depreciation_step,
                &mut rates.equipment_depreciation_step,
            ),
            (
                "reception_first_two_years",
                self.reception_first_two_years,
                &mut rates.reception_first_two_years,
            ),
            (
                "reception_later_years",
                self.reception_later_years,
                &mut rates.reception_later_years,
            ),
        ];
        for (name, value, slot) in overrides {
            if let Some(value) = value {
                require_non_negative(&format!("facility_rates.{}", name), value)?;
                *slot = value;
            }
        }
        Ok(())
    }
}

/// Validated, fully-defaulted inputs for one pipeline run.
#[derive(Debug, Clone)]
pub struct PlanInputs {
    /// New first-year intake per plan year.
    pub new_first_year: [u32; PLAN_YEARS],
    /// Floor area per plan year in m².
    pub areas_m2: [u32; PLAN_YEARS],
    /// Tuition parameters with request overrides applied.
    pub tuition: TuitionConfig,
    /// Facility parameters with request overrides applied.
    pub facility: FacilityConfig,
    /// Staffing parameters with request overrides applied.
    pub staffing: StaffingConfig,
    /// Balance-sheet ratios with request overrides applied.
    pub balance: BalanceConfig,
    /// Manual headcounts, when supplied.
    pub staffing_overrides: Option<[HeadcountOverride; PLAN_YEARS]>,
    /// Editable balance-sheet values per tracked year.
    pub balance_overrides: [BalanceOverrides; TRACKED_BALANCE_YEARS],
    /// Funding plan, when supplied.
    pub funding: Option<FundingPlan>,
}

fn to_year_array<T>(field: &str, values: Vec<T>) -> EngineResult<[T; PLAN_YEARS]> {
    let len = values.len();
    values
        .try_into()
        .map_err(|_| EngineError::InvalidParameter {
            field: field.to_string(),
            message: format!("expected {} values, got {}", PLAN_YEARS, len),
        })
}

fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidParameter {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    Ok(())
}

impl PlanRequest {
    /// Validates the request against the configuration and fills in the
    /// configured defaults for anything not supplied.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] for wrong-length year
    /// vectors, areas below the configured minimum, negative monetary
    /// overrides, or balance overrides targeting a derived line.
    pub fn resolve(self, config: &PlanConfig) -> EngineResult<PlanInputs> {
        let new_first_year = to_year_array(
            "new_first_year_students",
            self.new_first_year_students
                .unwrap_or_else(|| config.tuition().default_new_first_year.clone()),
        )?;

        let mut facility = config.facility().clone();
        if let Some(rates) = &self.facility_rates {
            rates.apply(&mut facility)?;
        }

        let areas_m2 = to_year_array(
            "areas_m2",
            self.areas_m2
                .unwrap_or_else(|| facility.default_areas_m2.clone()),
        )?;
        let minimum = facility.minimum_area_m2;
        for (year_index, &area) in areas_m2.iter().enumerate() {
            if area < minimum {
                return Err(EngineError::InvalidParameter {
                    field: "areas_m2".to_string(),
                    message: format!(
                        "year {} area {} m² is below the minimum of {} m²",
                        year_index + 1,
                        area,
                        minimum
                    ),
                });
            }
        }

        let mut tuition = config.tuition().clone();
        if let Some(fee) = self.annual_fee {
            require_non_negative("annual_fee", fee)?;
            tuition.annual_fee = fee;
        }
        if let Some(contributions) = self.annual_contributions {
            require_non_negative("annual_contributions", contributions)?;
            tuition.annual_contributions = contributions;
        }

        let mut staffing = config.staffing().clone();
        if let Some(salary) = self.hired_salary {
            require_non_negative("hired_salary", salary)?;
            staffing.hired_salary = salary;
        }
        if let Some(salary) = self.contract_salary {
            require_non_negative("contract_salary", salary)?;
            staffing.contract_salary = salary;
        }
        if let Some(salary) = self.admin_salary {
            require_non_negative("admin_salary", salary)?;
            staffing.admin_salary = salary;
        }

        let mut balance = config.balance().clone();
        if let Some(cash) = self.initial_cash {
            require_non_negative("initial_cash", cash)?;
            balance.initial_cash = cash;
        }

        let staffing_overrides = self
            .staffing_overrides
            .map(|o| to_year_array("staffing_overrides", o))
            .transpose()?;

        if self.balance_overrides.len() > TRACKED_BALANCE_YEARS {
            return Err(EngineError::InvalidParameter {
                field: "balance_overrides".to_string(),
                message: format!(
                    "at most {} tracked years, got {}",
                    TRACKED_BALANCE_YEARS,
                    self.balance_overrides.len()
                ),
            });
        }
        let mut balance_overrides: [BalanceOverrides; TRACKED_BALANCE_YEARS] = Default::default();
        for (year_index, overrides) in self.balance_overrides.into_iter().enumerate() {
            if let Some(code) = overrides.first_computed_target() {
                return Err(EngineError::InvalidParameter {
                    field: "balance_overrides".to_string(),
                    message: format!(
                        "year {} line {} is derived and cannot be overridden",
                        year_index + 1,
                        code.code()
                    ),
                });
            }
            balance_overrides[year_index] = overrides;
        }

        Ok(PlanInputs {
            new_first_year,
            areas_m2,
            tuition,
            facility,
            staffing,
            balance,
            staffing_overrides,
            balance_overrides,
            funding: self.funding,
        })
    }
}
