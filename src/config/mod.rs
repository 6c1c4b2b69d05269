//! Configuration loading and management for the planning engine.
//!
//! This module provides functionality to load the plan parameter set from
//! YAML files, including tuition, facility, staffing and balance-sheet
//! configuration.
//!
//! # Example
//!
//! ```no_run
//! use plan_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/schoolplan").unwrap();
//! println!("Loaded plan template: {}", config.config().metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BalanceConfig, FacilityConfig, FacilityRates, PlanConfig, PlanMetadata, StaffingConfig,
    TuitionConfig,
};
