//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading plan
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    BalanceConfig, FacilityConfig, PlanConfig, PlanMetadata, StaffingConfig, TuitionConfig,
};

/// Loads and provides access to the plan configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides access to tuition, facility, staffing and balance-sheet
/// parameters.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/schoolplan/
/// ├── plan.yaml      # Plan metadata
/// ├── tuition.yaml   # Fee and contribution defaults
/// ├── facility.yaml  # Floor-area defaults and per-m² rates
/// ├── staffing.yaml  # Staffing ratios and salaries
/// └── balance.yaml   # Balance-sheet derivation ratios
/// ```
///
/// # Example
///
/// ```no_run
/// use plan_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/schoolplan").unwrap();
/// println!("Annual fee: {}", loader.config().tuition().annual_fee);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PlanConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/schoolplan")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<PlanMetadata>(&path.join("plan.yaml"))?;
        let tuition = Self::load_yaml::<TuitionConfig>(&path.join("tuition.yaml"))?;
        let facility = Self::load_yaml::<FacilityConfig>(&path.join("facility.yaml"))?;
        let staffing = Self::load_yaml::<StaffingConfig>(&path.join("staffing.yaml"))?;
        let balance = Self::load_yaml::<BalanceConfig>(&path.join("balance.yaml"))?;

        let config = PlanConfig::new(metadata, tuition, facility, staffing, balance);

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded plan configuration.
    pub fn config(&self) -> &PlanConfig {
        &self.config
    }
}
