//! Error types for the LearnED payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the configuration, store and back-office operations
//! can produce. The salary calculator itself never fails: a classroom
//! without pricing is reported as unpriced, not as an error.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use learned_payroll::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The salary policy contains values that cannot be applied.
    #[error("Invalid salary policy: {message}")]
    InvalidPolicy {
        /// What is wrong with the policy.
        message: String,
    },

    /// No pricing entry exists with the given id.
    #[error("Pricing entry not found: {id}")]
    PricingNotFound {
        /// The pricing entry id.
        id: String,
    },

    /// A pricing entry failed validation.
    #[error("Invalid pricing field '{field}': {message}")]
    InvalidPricing {
        /// The offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// A pricing entry already exists for the grade/board key.
    #[error("Pricing already exists for {key}")]
    DuplicatePricing {
        /// The composite grade/board key.
        key: String,
    },

    /// The requested teacher is not in the loaded roster.
    #[error("Teacher not found: {id}")]
    TeacherNotFound {
        /// The teacher id.
        id: String,
    },

    /// The requested payment is not in the loaded payments.
    #[error("Payment not found: {id}")]
    PaymentNotFound {
        /// The payment id.
        id: String,
    },

    /// A payment cannot move from its current status.
    #[error("Payment '{id}' cannot be {action}: status is {status}")]
    InvalidPaymentTransition {
        /// The payment id.
        id: String,
        /// The attempted action ("approved" or "declined").
        action: String,
        /// The current status.
        status: String,
    },

    /// A request field was missing or out of range.
    #[error("Validation error on '{field}': {message}")]
    ValidationError {
        /// The field that failed validation.
        field: String,
        /// A description of the failure.
        message: String,
    },

    /// The backing data source failed.
    #[error("Data source error on '{table}': {message}")]
    DataSource {
        /// The table being read or written.
        table: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
