//! Tiered per-student share calculation.
//!
//! Each student enrolled in a classroom earns the teacher a declining share
//! of the classroom's monthly fee. With the standing policy the 1st student
//! earns 75 %, the 2nd 50 %, the 3rd 25 %, the 4th 10 % and the 5th and
//! every later student 5 %.

use rust_decimal::Decimal;

use crate::config::SalaryPolicy;

/// Returns the share paid for the student at a zero-based position.
///
/// Positions beyond the tier list earn the policy's tail percentage.
///
/// # Examples
///
/// ```
/// use learned_payroll::calculation::student_percentage;
/// use learned_payroll::config::SalaryPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = SalaryPolicy::default();
/// assert_eq!(student_percentage(&policy, 0), Decimal::new(75, 2));
/// assert_eq!(student_percentage(&policy, 9), Decimal::new(5, 2));
/// ```
pub fn student_percentage(policy: &SalaryPolicy, position: usize) -> Decimal {
    policy
        .tier_percentages
        .get(position)
        .copied()
        .unwrap_or(policy.tail_percentage)
}

/// Sums the shares of the first `student_count` students.
///
/// The tail is uncapped: every student past the tier list adds the tail
/// percentage, so the sum grows without bound as the roster grows.
pub fn tiered_percentage_sum(policy: &SalaryPolicy, student_count: usize) -> Decimal {
    let tiers = &policy.tier_percentages;
    let tiered = student_count.min(tiers.len());
    let tail_students = student_count - tiered;

    let tier_sum: Decimal = tiers[..tiered].iter().copied().sum();
    tier_sum + policy.tail_percentage * Decimal::from(tail_students)
}

/// Returns what each student contributes, in enrollment order.
pub fn student_contributions(
    fee_per_month: Decimal,
    student_count: usize,
    policy: &SalaryPolicy,
) -> Vec<Decimal> {
    (0..student_count)
        .map(|position| fee_per_month * student_percentage(policy, position))
        .collect()
}

/// Calculates a classroom's salary before duration normalization.
///
/// # Examples
///
/// ```
/// use learned_payroll::calculation::calculate_classroom_salary;
/// use learned_payroll::config::SalaryPolicy;
/// use rust_decimal::Decimal;
///
/// let salary = calculate_classroom_salary(Decimal::new(1400, 0), 3, &SalaryPolicy::default());
/// assert_eq!(salary, Decimal::new(2100, 0));
/// ```
pub fn calculate_classroom_salary(
    fee_per_month: Decimal,
    student_count: usize,
    policy: &SalaryPolicy,
) -> Decimal {
    fee_per_month * tiered_percentage_sum(policy, student_count)
}
