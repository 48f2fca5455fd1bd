//! Duration normalization.
//!
//! Pricing entries carry the hours taught per month. Classroom salary is
//! scaled by those hours over the policy's base hours, so a classroom
//! taught for exactly the base hours keeps its salary unchanged.

use rust_decimal::Decimal;

use crate::config::SalaryPolicy;

/// Returns the factor `duration_per_month / base_hours`.
pub fn duration_factor(duration_per_month: Decimal, policy: &SalaryPolicy) -> Decimal {
    duration_per_month / policy.base_hours
}

/// Scales a classroom salary by its monthly duration.
///
/// The salary is multiplied by the duration before dividing by the base.
///
/// # Examples
///
/// ```
/// use learned_payroll::calculation::normalize_to_base_hours;
/// use learned_payroll::config::SalaryPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = SalaryPolicy::default();
/// let monthly = normalize_to_base_hours(Decimal::new(2100, 0), Decimal::new(12, 0), &policy);
/// assert_eq!(monthly, Decimal::new(3150, 0));
/// ```
pub fn normalize_to_base_hours(
    classroom_salary: Decimal,
    duration_per_month: Decimal,
    policy: &SalaryPolicy,
) -> Decimal {
    classroom_salary * duration_per_month / policy.base_hours
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_base_duration_leaves_salary_unchanged() {
        let policy = SalaryPolicy::default();
        assert_eq!(duration_factor(dec("8"), &policy), Decimal::ONE);
        assert_eq!(normalize_to_base_hours(dec("1700"), dec("8"), &policy), dec("1700"));
    }

    #[test]
    fn test_half_duration_halves_salary() {
        let policy = SalaryPolicy::default();
        assert_eq!(normalize_to_base_hours(dec("2100"), dec("4"), &policy), dec("1050"));
    }

    #[test]
    fn test_fractional_duration() {
        let policy = SalaryPolicy::default();
        assert_eq!(normalize_to_base_hours(dec("1000"), dec("10"), &policy), dec("1250"));
        assert_eq!(duration_factor(dec("6"), &policy), dec("0.75"));
    }

    #[test]
    fn test_zero_salary_stays_zero() {
        let policy = SalaryPolicy::default();
        assert_eq!(normalize_to_base_hours(Decimal::ZERO, dec("12"), &policy), Decimal::ZERO);
    }
}
