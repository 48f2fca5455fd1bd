//! Configuration loading and management for the payroll engine.
//!
//! This module loads the salary policy, the board/grade catalog and the
//! seed pricing table from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use learned_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/learned").unwrap();
//! println!("Tiers: {:?}", config.policy().tier_percentages);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{Catalog, PaymentPlan, PayrollConfig, PricingSeed, SalaryPolicy};
