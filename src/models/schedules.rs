//! Per-year schedule models produced by the upstream pipeline stages.
//!
//! Each schedule is an ordered list of one row per plan year, carrying the
//! breakdown the presentation layer renders as a table plus the totals the
//! downstream statements consume.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::GRADES;

/// Revenue for one plan year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueYear {
    /// The 1-based plan year.
    pub year: u32,
    /// Tuition revenue per grade, in promotion order.
    pub by_grade: [Decimal; GRADES],
    /// Tuition revenue across all grades.
    pub tuition_total: Decimal,
    /// Flat annual contributions.
    pub contributions: Decimal,
    /// Total revenue (tuition + contributions).
    pub total: Decimal,
}

/// The five-year revenue schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSchedule {
    /// One row per plan year, in year order.
    pub years: Vec<RevenueYear>,
}

impl RevenueSchedule {
    /// Total revenue for a 0-based year index.
    pub fn total(&self, year_index: usize) -> Decimal {
        self.years[year_index].total
    }
}

/// Facility cost breakdown for one plan year.
///
/// All nine lines are `area × rate` for the year's floor area; the
/// equipment-depreciation and reception rates are year-dependent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityCostYear {
    /// The 1-based plan year.
    pub year: u32,
    /// Floor area for the year, in m².
    pub area_m2: u32,
    /// Building maintenance.
    pub building_maintenance: Decimal,
    /// Plant and systems maintenance.
    pub plant_maintenance: Decimal,
    /// Electricity.
    pub electricity: Decimal,
    /// Gas supply.
    pub gas: Decimal,
    /// Water.
    pub water: Decimal,
    /// Cleaning.
    pub cleaning: Decimal,
    /// Furniture depreciation.
    pub furniture_depreciation: Decimal,
    /// Equipment depreciation (rate ramps up each year).
    pub equipment_depreciation: Decimal,
    /// Reception and shared services (rate steps down after year 2).
    pub reception: Decimal,
    /// Total facility cost for the year.
    pub total: Decimal,
}

impl FacilityCostYear {
    /// The non-cash portion of the year's facility cost.
    pub fn depreciation_total(&self) -> Decimal {
        self.furniture_depreciation + self.equipment_depreciation
    }
}

/// The five-year facility cost schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityCostSchedule {
    /// One row per plan year, in year order.
    pub years: Vec<FacilityCostYear>,
}

impl FacilityCostSchedule {
    /// Total facility cost for a 0-based year index.
    pub fn total(&self, year_index: usize) -> Decimal {
        self.years[year_index].total
    }

    /// Depreciation carve-out for a 0-based year index.
    pub fn depreciation_total(&self, year_index: usize) -> Decimal {
        self.years[year_index].depreciation_total()
    }
}

/// Staffing headcounts and costs for one plan year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingYear {
    /// The 1-based plan year.
    pub year: u32,
    /// Total enrollment driving the headcount derivation.
    pub students: u32,
    /// Hired teachers.
    pub hired: u32,
    /// Contract teachers.
    pub contracted: u32,
    /// Annual cost of the hired teachers.
    pub hired_cost: Decimal,
    /// Annual cost of the contract teachers.
    pub contract_cost: Decimal,
    /// Fixed administrative/directive staff cost.
    pub admin_cost: Decimal,
    /// Total personnel cost for the year.
    pub total: Decimal,
}

/// The five-year staffing schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingSchedule {
    /// One row per plan year, in year order.
    pub years: Vec<StaffingYear>,
}

impl StaffingSchedule {
    /// Total personnel cost for a 0-based year index.
    pub fn total(&self, year_index: usize) -> Decimal {
        self.years[year_index].total
    }
}

/// A per-year manual override of the derived teacher headcounts.
///
/// When present, the explicit counts replace the ratio-derived ones for
/// that year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadcountOverride {
    /// Explicit hired-teacher count, if overridden.
    #[serde(default)]
    pub hired: Option<u32>,
    /// Explicit contract-teacher count, if overridden.
    #[serde(default)]
    pub contracted: Option<u32>,
}
