//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the salary
//! policy, catalog and seed pricing from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::PricingRate;

use super::types::{Catalog, PayrollConfig, PricingSeed, SalaryPolicy};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/learned/
/// ├── policy.yaml    # Salary policy (tiers, base hours, months per year)
/// ├── catalog.yaml   # Boards, grade levels, subjects, payment plans
/// └── pricing.yaml   # Seed grade/board pricing
/// ```
///
/// # Example
///
/// ```no_run
/// use learned_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/learned").unwrap();
/// println!("Base hours: {}", loader.policy().base_hours);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing or unparsable, if the
    /// policy is invalid, or if a seed pricing entry fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<SalaryPolicy>(&path.join("policy.yaml"))?;
        let catalog = Self::load_yaml::<Catalog>(&path.join("catalog.yaml"))?;
        let seed = Self::load_yaml::<PricingSeed>(&path.join("pricing.yaml"))?;

        Self::from_parts(policy, catalog, seed.pricing)
    }

    /// Builds a loader from already-parsed parts, validating them.
    pub fn from_parts(
        policy: SalaryPolicy,
        catalog: Catalog,
        seed_pricing: Vec<PricingRate>,
    ) -> EngineResult<Self> {
        policy.validate()?;
        let loader = Self {
            config: PayrollConfig::new(policy, catalog, seed_pricing),
        };
        for rate in loader.seed_pricing() {
            loader.validate_pricing(rate)?;
        }
        Ok(loader)
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

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the salary policy.
    pub fn policy(&self) -> &SalaryPolicy {
        self.config.policy()
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        self.config.catalog()
    }

    /// Returns the seed pricing entries.
    pub fn seed_pricing(&self) -> &[PricingRate] {
        self.config.seed_pricing()
    }

    /// Validates a pricing entry against the field rules and the catalog.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use learned_payroll::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/learned")?;
    /// for rate in loader.seed_pricing() {
    ///     loader.validate_pricing(rate)?;
    /// }
    /// # Ok::<(), learned_payroll::error::EngineError>(())
    /// ```
    pub fn validate_pricing(&self, rate: &PricingRate) -> EngineResult<()> {
        rate.validate()?;

        let catalog = self.catalog();
        if !catalog.has_board(&rate.board) {
            return Err(EngineError::InvalidPricing {
                field: "board".to_string(),
                message: format!("'{}' is not a supported board", rate.board),
            });
        }
        if !catalog.has_grade(rate.grade_level) {
            return Err(EngineError::InvalidPricing {
                field: "grade_level".to_string(),
                message: format!("grade {} is not offered", rate.grade_level),
            });
        }
        Ok(())
    }
}
