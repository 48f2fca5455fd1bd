//! Grade/board pricing models.
//!
//! This module defines the [`PricingRate`] record stored in the
//! `grade_subject_pricing` table, the composite [`PricingKey`] used to look
//! a rate up, and the [`PricingTable`] built from a list of rates.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest monthly fee a pricing entry may carry.
pub const MAX_FEE_PER_MONTH: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// Largest monthly duration, in hours, a pricing entry may carry.
pub const MAX_DURATION_PER_MONTH: Decimal = Decimal::from_parts(744, 0, 0, false, 0);

fn default_subject() -> String {
    "All".to_string()
}

fn default_active() -> bool {
    true
}

/// Composite lookup key of the form `"{grade_level}_{board}"`.
///
/// A missing grade or board renders as an empty segment, so a classroom
/// with incomplete data produces a key that no pricing entry carries.
///
/// # Example
///
/// ```
/// use learned_payroll::models::PricingKey;
///
/// assert_eq!(PricingKey::new(Some(8), Some("CBSE")).as_str(), "8_CBSE");
/// assert_eq!(PricingKey::new(None, Some("CBSE")).as_str(), "_CBSE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricingKey(String);

impl PricingKey {
    /// Builds a key from an optional grade level and board.
    pub fn new(grade_level: Option<u32>, board: Option<&str>) -> Self {
        let grade = grade_level.map(|g| g.to_string()).unwrap_or_default();
        let board = board.unwrap_or_default();
        Self(format!("{}_{}", grade, board))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PricingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A monthly fee and duration for one grade level on one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRate {
    /// Unique identifier of the pricing entry.
    pub id: String,
    /// The grade level (1-12).
    pub grade_level: u32,
    /// The education board (e.g., "CBSE").
    pub board: String,
    /// The subject this price applies to; "All" covers every subject.
    #[serde(default = "default_subject")]
    pub subject: String,
    /// Fee charged per student per month.
    pub fee_per_month: Decimal,
    /// Teaching hours delivered per month.
    pub duration_per_month: Decimal,
    /// Optional hourly fee shown alongside the monthly fee.
    #[serde(default)]
    pub fee_per_hour: Option<Decimal>,
    /// Whether the entry is currently offered.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl PricingRate {
    /// Returns the composite grade/board key for this rate.
    pub fn key(&self) -> PricingKey {
        PricingKey::new(Some(self.grade_level), Some(&self.board))
    }

    /// Checks the fields the pricing form requires.
    ///
    /// Grade must be 1-12 and the board non-blank. Fee and duration must
    /// be positive and within [`MAX_FEE_PER_MONTH`] and
    /// [`MAX_DURATION_PER_MONTH`]; the hourly fee, when given, non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        if !(1..=12).contains(&self.grade_level) {
            return Err(invalid("grade_level", "must be between 1 and 12"));
        }
        if self.board.trim().is_empty() {
            return Err(invalid("board", "is required"));
        }
        validate_amounts(self.fee_per_month, self.duration_per_month, self.fee_per_hour)
    }

    /// Applies an edit to the mutable fields of this rate.
    pub fn apply(&mut self, update: &PricingUpdate) {
        self.fee_per_month = update.fee_per_month;
        self.duration_per_month = update.duration_per_month;
        self.fee_per_hour = update.fee_per_hour;
    }
}

fn validate_amounts(
    fee_per_month: Decimal,
    duration_per_month: Decimal,
    fee_per_hour: Option<Decimal>,
) -> EngineResult<()> {
    if fee_per_month <= Decimal::ZERO {
        return Err(invalid("fee_per_month", "must be greater than zero"));
    }
    if fee_per_month > MAX_FEE_PER_MONTH {
        return Err(invalid("fee_per_month", "exceeds the maximum monthly fee"));
    }
    if duration_per_month <= Decimal::ZERO {
        return Err(invalid("duration_per_month", "must be greater than zero"));
    }
    if duration_per_month > MAX_DURATION_PER_MONTH {
        return Err(invalid("duration_per_month", "exceeds the hours in a month"));
    }
    if fee_per_hour.is_some_and(|f| f < Decimal::ZERO) {
        return Err(invalid("fee_per_hour", "cannot be negative"));
    }
    Ok(())
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidPricing {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// The editable subset of a pricing entry.
///
/// Grade and board are part of the lookup key and are fixed once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingUpdate {
    /// New monthly fee.
    pub fee_per_month: Decimal,
    /// New monthly duration in hours.
    pub duration_per_month: Decimal,
    /// New hourly fee.
    #[serde(default)]
    pub fee_per_hour: Option<Decimal>,
}

impl PricingUpdate {
    /// Validates the update with the same rules as a full entry.
    pub fn validate(&self) -> EngineResult<()> {
        validate_amounts(self.fee_per_month, self.duration_per_month, self.fee_per_hour)
    }
}

/// Pricing rates indexed by their grade/board key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingTable {
    rates: HashMap<PricingKey, PricingRate>,
}

impl PricingTable {
    /// Builds a table from a list of rates.
    ///
    /// When two rates share a key, the one appearing later wins.
    pub fn from_rates<'a, I>(rates: I) -> Self
    where
        I: IntoIterator<Item = &'a PricingRate>,
    {
        let rates = rates
            .into_iter()
            .map(|rate| (rate.key(), rate.clone()))
            .collect();
        Self { rates }
    }

    /// Looks up the rate for a key.
    pub fn get(&self, key: &PricingKey) -> Option<&PricingRate> {
        self.rates.get(key)
    }

    /// Returns true if a rate exists for the key.
    pub fn contains(&self, key: &PricingKey) -> bool {
        self.rates.contains_key(key)
    }

    /// Number of distinct keys in the table.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the table has no rates.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Filters rates by optional grade level and board, as the pricing screen does.
pub fn filter_rates<'a>(
    rates: &'a [PricingRate],
    grade_level: Option<u32>,
    board: Option<&str>,
) -> Vec<&'a PricingRate> {
    rates
        .iter()
        .filter(|r| grade_level.is_none_or(|g| r.grade_level == g))
        .filter(|r| board.is_none_or(|b| r.board == b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rate(id: &str, grade: u32, board: &str, fee: &str) -> PricingRate {
        PricingRate {
            id: id.to_string(),
            grade_level: grade,
            board: board.to_string(),
            subject: "All".to_string(),
            fee_per_month: dec(fee),
            duration_per_month: dec("8"),
            fee_per_hour: None,
            is_active: true,
        }
    }

    #[test]
    fn test_key_joins_grade_and_board() {
        assert_eq!(rate("p1", 8, "CBSE", "1400").key().as_str(), "8_CBSE");
    }

    #[test]
    fn test_key_with_missing_parts_has_empty_segments() {
        assert_eq!(PricingKey::new(Some(8), None).as_str(), "8_");
        assert_eq!(PricingKey::new(None, None).as_str(), "_");
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let json = r#"{
            "id": "p1",
            "grade_level": 5,
            "board": "ICSE",
            "fee_per_month": 1000,
            "duration_per_month": 8
        }"#;

        let rate: PricingRate = serde_json::from_str(json).unwrap();
        assert_eq!(rate.subject, "All");
        assert!(rate.is_active);
        assert_eq!(rate.fee_per_hour, None);
        assert_eq!(rate.fee_per_month, dec("1000"));
    }

    #[test]
    fn test_table_later_rate_wins_on_duplicate_key() {
        let rates = vec![rate("p1", 8, "CBSE", "1400"), rate("p2", 8, "CBSE", "1500")];
        let table = PricingTable::from_rates(&rates);

        assert_eq!(table.len(), 1);
        let found = table.get(&PricingKey::new(Some(8), Some("CBSE"))).unwrap();
        assert_eq!(found.id, "p2");
    }

    #[test]
    fn test_table_lookup_is_exact_match() {
        let rates = vec![rate("p1", 8, "CBSE", "1400")];
        let table = PricingTable::from_rates(&rates);

        assert!(table.contains(&PricingKey::new(Some(8), Some("CBSE"))));
        assert!(!table.contains(&PricingKey::new(Some(8), Some("cbse"))));
        assert!(!table.contains(&PricingKey::new(Some(9), Some("CBSE"))));
    }

    #[test]
    fn test_validate_accepts_complete_rate() {
        assert!(rate("p1", 8, "CBSE", "1400").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_grade() {
        let result = rate("p1", 13, "CBSE", "1400").validate();
        match result {
            Err(EngineError::InvalidPricing { field, .. }) => assert_eq!(field, "grade_level"),
            other => panic!("Expected InvalidPricing, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_fee() {
        let result = rate("p1", 8, "CBSE", "0").validate();
        match result {
            Err(EngineError::InvalidPricing { field, .. }) => assert_eq!(field, "fee_per_month"),
            other => panic!("Expected InvalidPricing, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_fee_above_maximum() {
        let result = rate("p1", 8, "CBSE", "79228162514264337593543950335").validate();
        match result {
            Err(EngineError::InvalidPricing { field, .. }) => assert_eq!(field, "fee_per_month"),
            other => panic!("Expected InvalidPricing, got {:?}", other),
        }
        assert!(rate("p1", 8, "CBSE", "10000000").validate().is_ok());
    }

    #[test]
    fn test_update_rejects_duration_beyond_month() {
        let update = PricingUpdate {
            fee_per_month: dec("1400"),
            duration_per_month: dec("745"),
            fee_per_hour: None,
        };
        match update.validate() {
            Err(EngineError::InvalidPricing { field, .. }) => {
                assert_eq!(field, "duration_per_month")
            }
            other => panic!("Expected InvalidPricing, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_blank_board() {
        let result = rate("p1", 8, "  ", "1400").validate();
        assert!(matches!(result, Err(EngineError::InvalidPricing { .. })));
    }

    #[test]
    fn test_apply_update_replaces_editable_fields() {
        let mut r = rate("p1", 8, "CBSE", "1400");
        r.apply(&PricingUpdate {
            fee_per_month: dec("1600"),
            duration_per_month: dec("12"),
            fee_per_hour: Some(dec("133.33")),
        });

        assert_eq!(r.fee_per_month, dec("1600"));
        assert_eq!(r.duration_per_month, dec("12"));
        assert_eq!(r.fee_per_hour, Some(dec("133.33")));
        assert_eq!(r.key().as_str(), "8_CBSE");
    }

    #[test]
    fn test_filter_rates_by_grade_and_board() {
        let rates = vec![
            rate("p1", 8, "CBSE", "1400"),
            rate("p2", 8, "ICSE", "1500"),
            rate("p3", 5, "CBSE", "1000"),
        ];

        assert_eq!(filter_rates(&rates, None, None).len(), 3);
        assert_eq!(filter_rates(&rates, Some(8), None).len(), 2);
        let cbse_8 = filter_rates(&rates, Some(8), Some("CBSE"));
        assert_eq!(cbse_8.len(), 1);
        assert_eq!(cbse_8[0].id, "p1");
    }
}
