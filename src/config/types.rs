//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::PricingRate;

/// Business policy for turning classroom fees into teacher salary.
///
/// The defaults reproduce the platform's standing policy: 75 %, 50 %,
/// 25 %, 10 % and 5 % of the monthly fee for the first five students,
/// 5 % for every student after that, an 8-hour reference block and a
/// twelve-month year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryPolicy {
    /// Share of the fee paid for the 1st, 2nd, ... student.
    pub tier_percentages: Vec<Decimal>,
    /// Share paid for every student beyond the listed tiers.
    pub tail_percentage: Decimal,
    /// Reference hours the monthly duration is normalized against.
    pub base_hours: Decimal,
    /// Multiplier from monthly to annual salary.
    pub months_per_year: Decimal,
}

impl Default for SalaryPolicy {
    fn default() -> Self {
        Self {
            tier_percentages: vec![
                Decimal::new(75, 2),
                Decimal::new(50, 2),
                Decimal::new(25, 2),
                Decimal::new(10, 2),
                Decimal::new(5, 2),
            ],
            tail_percentage: Decimal::new(5, 2),
            base_hours: Decimal::new(8, 0),
            months_per_year: Decimal::new(12, 0),
        }
    }
}

impl SalaryPolicy {
    /// Checks that every value can be applied.
    pub fn validate(&self) -> EngineResult<()> {
        if self.tier_percentages.is_empty() {
            return Err(invalid_policy("tier_percentages must not be empty"));
        }
        let in_range = |p: &Decimal| *p >= Decimal::ZERO && *p <= Decimal::ONE;
        if let Some(p) = self.tier_percentages.iter().find(|p| !in_range(p)) {
            return Err(invalid_policy(&format!(
                "tier percentage {} is outside 0..=1",
                p
            )));
        }
        if !in_range(&self.tail_percentage) {
            return Err(invalid_policy(&format!(
                "tail percentage {} is outside 0..=1",
                self.tail_percentage
            )));
        }
        if self.base_hours <= Decimal::ZERO {
            return Err(invalid_policy("base_hours must be greater than zero"));
        }
        if self.months_per_year <= Decimal::ZERO {
            return Err(invalid_policy("months_per_year must be greater than zero"));
        }
        Ok(())
    }
}

fn invalid_policy(message: &str) -> EngineError {
    EngineError::InvalidPolicy {
        message: message.to_string(),
    }
}

/// A payment plan offered to students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlan {
    /// Plan identifier (e.g., "monthly").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Billing cycle.
    pub cycle: String,
    /// Months of access the plan buys.
    pub months: u32,
}

/// Boards, grades and subjects the platform offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Supported education boards.
    pub boards: Vec<String>,
    /// Supported grade levels.
    pub grade_levels: Vec<u32>,
    /// Common subjects.
    pub subjects: Vec<String>,
    /// Payment plans.
    #[serde(default)]
    pub payment_plans: Vec<PaymentPlan>,
}

impl Catalog {
    /// Returns true if the board is offered.
    pub fn has_board(&self, board: &str) -> bool {
        self.boards.iter().any(|b| b == board)
    }

    /// Returns true if the grade level is offered.
    pub fn has_grade(&self, grade_level: u32) -> bool {
        self.grade_levels.contains(&grade_level)
    }
}

/// Seed pricing file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingSeed {
    /// Pricing entries to start from.
    pub pricing: Vec<PricingRate>,
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    policy: SalaryPolicy,
    catalog: Catalog,
    seed_pricing: Vec<PricingRate>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(policy: SalaryPolicy, catalog: Catalog, seed_pricing: Vec<PricingRate>) -> Self {
        Self {
            policy,
            catalog,
            seed_pricing,
        }
    }

    /// Returns the salary policy.
    pub fn policy(&self) -> &SalaryPolicy {
        &self.policy
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the seed pricing entries.
    pub fn seed_pricing(&self) -> &[PricingRate] {
        &self.seed_pricing
    }
}
