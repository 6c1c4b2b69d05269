//! Configuration types for the planning engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every scalar cost
//! parameter of the plan lives here; the calculators never hold constants
//! of their own.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Metadata about the plan template.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanMetadata {
    /// A short code identifying the plan template (e.g., "SCHOOL_BP_5Y").
    pub code: String,
    /// The human-readable name of the plan template.
    pub name: String,
    /// The version of the parameter set.
    pub version: String,
    /// The currency every monetary value is expressed in.
    pub currency: String,
}

/// Tuition and contribution parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct TuitionConfig {
    /// The flat annual fee per enrolled student.
    pub annual_fee: Decimal,
    /// Flat contributions added to revenue every year.
    pub annual_contributions: Decimal,
    /// Default new first-year student intake per plan year.
    pub default_new_first_year: Vec<u32>,
}

/// Per-square-metre facility cost rates, per year.
///
/// Equipment depreciation ramps linearly: the effective rate for 0-based
/// year `i` is `equipment_depreciation_base + i * equipment_depreciation_step`.
/// The reception rate steps down after year 2, reflecting the planned move
/// to a larger site.
#[derive(Debug, Clone, Deserialize)]
pub struct FacilityRates {
    /// Building maintenance per m².
    pub building_maintenance: Decimal,
    /// Plant and systems maintenance per m².
    pub plant_maintenance: Decimal,
    /// Electricity per m².
    pub electricity: Decimal,
    /// Gas supply per m².
    pub gas: Decimal,
    /// Water per m².
    pub water: Decimal,
    /// Cleaning per m².
    pub cleaning: Decimal,
    /// Furniture depreciation per m².
    pub furniture_depreciation: Decimal,
    /// Equipment depreciation per m² in year 1.
    pub equipment_depreciation_base: Decimal,
    /// Yearly increment of the equipment depreciation rate per m².
    pub equipment_depreciation_step: Decimal,
    /// Reception and shared services per m² for years 1 and 2.
    pub reception_first_two_years: Decimal,
    /// Reception and shared services per m² from year 3 onwards.
    pub reception_later_years: Decimal,
}

/// Facility configuration: floor-area bounds, defaults and unit rates.
#[derive(Debug, Clone, Deserialize)]
pub struct FacilityConfig {
    /// The smallest floor area the plan accepts, in m².
    pub minimum_area_m2: u32,
    /// Default floor area per plan year, in m².
    pub default_areas_m2: Vec<u32>,
    /// Per-m² unit rates.
    pub rates: FacilityRates,
}

/// Staffing ratios, minimum headcounts and salaries.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffingConfig {
    /// One hired teacher is planned for every this many students.
    pub students_per_hired_teacher: u32,
    /// Minimum number of hired teachers in year 1.
    pub hired_floor_year_1: u32,
    /// Minimum number of hired teachers in year 2.
    pub hired_floor_year_2: u32,
    /// Baseline contract-teacher headcount in year 1.
    pub contract_minimum_year_1: u32,
    /// Baseline contract-teacher headcount in year 2.
    pub contract_minimum_year_2: u32,
    /// Baseline contract-teacher headcount from year 3 onwards.
    pub contract_minimum_later: u32,
    /// Annual cost of a hired teacher.
    pub hired_salary: Decimal,
    /// Annual cost of a contract teacher.
    pub contract_salary: Decimal,
    /// Fixed annual cost of the administrative/directive staff.
    pub admin_salary: Decimal,
}

/// Ratios used to derive balance-sheet lines from statement totals.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceConfig {
    /// Trade receivables as a fraction of yearly revenue.
    pub receivables_pct_of_revenue: Decimal,
    /// Tax receivables as a fraction of yearly total cost.
    pub tax_receivables_pct_of_cost: Decimal,
    /// Trade payables equal yearly total cost divided by this.
    pub trade_payables_cost_divisor: Decimal,
    /// Social-security payables as a fraction of yearly personnel cost.
    pub social_security_pct_of_personnel: Decimal,
    /// Tax payables as a fraction of yearly revenue.
    pub tax_payables_pct_of_revenue: Decimal,
    /// Accrued severance as a fraction of cumulative personnel cost.
    pub severance_pct_of_personnel: Decimal,
    /// Cash available before any net result is absorbed.
    pub initial_cash: Decimal,
}

/// The complete plan configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in a plan configuration directory.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// Plan metadata.
    metadata: PlanMetadata,
    /// Tuition parameters.
    tuition: TuitionConfig,
    /// Facility parameters.
    facility: FacilityConfig,
    /// Staffing parameters.
    staffing: StaffingConfig,
    /// Balance-sheet ratios.
    balance: BalanceConfig,
}

impl PlanConfig {
    /// Creates a new PlanConfig from its component parts.
    pub fn new(
        metadata: PlanMetadata,
        tuition: TuitionConfig,
        facility: FacilityConfig,
        staffing: StaffingConfig,
        balance: BalanceConfig,
    ) -> Self {
        Self {
            metadata,
            tuition,
            facility,
            staffing,
            balance,
        }
    }

    /// Returns the plan metadata.
    pub fn metadata(&self) -> &PlanMetadata {
        &self.metadata
    }

    /// Returns the tuition parameters.
    pub fn tuition(&self) -> &TuitionConfig {
        &self.tuition
    }

    /// Returns the facility parameters.
    pub fn facility(&self) -> &FacilityConfig {
        &self.facility
    }

    /// Returns the staffing parameters.
    pub fn staffing(&self) -> &StaffingConfig {
        &self.staffing
    }

    /// Returns the balance-sheet ratios.
    pub fn balance(&self) -> &BalanceConfig {
        &self.balance
    }
}
