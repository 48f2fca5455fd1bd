//! Teacher salary calculation.
//!
//! This module derives a teacher's projected monthly and annual earnings
//! from the classrooms they teach, the number of students enrolled in each,
//! and the grade/board pricing table.
//!
//! A classroom whose grade/board key has no pricing entry is reported as
//! [`ClassroomOutcome::Unpriced`] and left out of the total. Calculation
//! never fails.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::SalaryPolicy;
use crate::models::{
    Classroom, ClassroomOutcome, ClassroomSalary, PricingTable, SalaryBreakdown,
    StudentEnrollment, UnpricedClassroom, UnpricedReason,
};

use super::duration::normalize_to_base_hours;
use super::tiered_share::calculate_classroom_salary;

/// Counts enrollment records per classroom id.
///
/// Records without a classroom are ignored.
pub fn enrollment_counts(students: &[StudentEnrollment]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for classroom_id in students.iter().filter_map(|s| s.classroom_id.as_deref()) {
        *counts.entry(classroom_id).or_insert(0) += 1;
    }
    counts
}

/// Prices a single classroom with a known student count.
///
/// # Examples
///
/// ```
/// use learned_payroll::calculation::price_classroom;
/// use learned_payroll::config::SalaryPolicy;
/// use learned_payroll::models::{Classroom, ClassroomOutcome, PricingTable};
///
/// let classroom = Classroom {
///     id: "c1".to_string(),
///     name: "Grade 8 Physics".to_string(),
///     teacher_id: Some("t1".to_string()),
///     grade_level: Some(8),
///     board: Some("CBSE".to_string()),
///     subject: Some("Physics".to_string()),
///     is_active: true,
/// };
///
/// let outcome = price_classroom(&classroom, 3, &PricingTable::default(), &SalaryPolicy::default());
/// assert!(matches!(outcome, ClassroomOutcome::Unpriced(_)));
/// ```
pub fn price_classroom(
    classroom: &Classroom,
    student_count: usize,
    pricing: &PricingTable,
    policy: &SalaryPolicy,
) -> ClassroomOutcome {
    let key = classroom.pricing_key();

    let Some(rate) = pricing.get(&key) else {
        warn!(
            classroom_id = %classroom.id,
            classroom_name = %classroom.name,
            pricing_key = %key,
            "No pricing found for classroom; excluded from salary"
        );
        return ClassroomOutcome::Unpriced(UnpricedClassroom {
            classroom_id: classroom.id.clone(),
            classroom_name: classroom.name.clone(),
            reason: UnpricedReason::MissingPricingRate {
                key: key.as_str().to_string(),
            },
        });
    };

    let salary_contribution = calculate_classroom_salary(rate.fee_per_month, student_count, policy);
    let monthly_salary =
        normalize_to_base_hours(salary_contribution, rate.duration_per_month, policy);

    debug!(
        classroom_id = %classroom.id,
        pricing_key = %key,
        student_count,
        base_fee = %rate.fee_per_month,
        monthly_salary = %monthly_salary,
        "Priced classroom"
    );

    ClassroomOutcome::Priced(ClassroomSalary {
        classroom_id: classroom.id.clone(),
        classroom_name: classroom.name.clone(),
        grade: classroom.grade_level,
        subject: classroom.subject.clone(),
        student_count,
        base_fee: rate.fee_per_month,
        salary_contribution,
        monthly_salary,
    })
}

/// Calculates a teacher's salary across all of their classrooms.
///
/// # Arguments
///
/// * `teacher_id` - The teacher to calculate for
/// * `classrooms` - Every classroom; only the teacher's are used
/// * `students` - Every enrollment record; counted per classroom
/// * `pricing` - The grade/board pricing table
/// * `policy` - The salary policy
///
/// # Returns
///
/// The monthly and annual totals, the priced classroom details in input
/// order, and the classrooms left out for want of pricing.
///
/// # Examples
///
/// ```
/// use learned_payroll::calculation::calculate_teacher_salary;
/// use learned_payroll::config::SalaryPolicy;
/// use learned_payroll::models::PricingTable;
/// use rust_decimal::Decimal;
///
/// let breakdown = calculate_teacher_salary(
///     "t1",
///     &[],
///     &[],
///     &PricingTable::default(),
///     &SalaryPolicy::default(),
/// );
/// assert_eq!(breakdown.total_monthly, Decimal::ZERO);
/// assert!(breakdown.classroom_details.is_empty());
/// ```
pub fn calculate_teacher_salary(
    teacher_id: &str,
    classrooms: &[Classroom],
    students: &[StudentEnrollment],
    pricing: &PricingTable,
    policy: &SalaryPolicy,
) -> SalaryBreakdown {
    let counts = enrollment_counts(students);
    calculate_with_counts(teacher_id, classrooms, &counts, pricing, policy)
}

/// Same as [`calculate_teacher_salary`] with enrollment counts computed once
/// by the caller, for reports that cover many teachers.
pub(crate) fn calculate_with_counts(
    teacher_id: &str,
    classrooms: &[Classroom],
    counts: &HashMap<&str, usize>,
    pricing: &PricingTable,
    policy: &SalaryPolicy,
) -> SalaryBreakdown {
    let mut breakdown = SalaryBreakdown::default();

    for classroom in classrooms.iter().filter(|c| c.is_taught_by(teacher_id)) {
        let student_count = counts.get(classroom.id.as_str()).copied().unwrap_or(0);
        let outcome = price_classroom(classroom, student_count, pricing, policy);
        breakdown.total_monthly += outcome.monthly_salary();

        match outcome {
            ClassroomOutcome::Priced(detail) => breakdown.classroom_details.push(detail),
            ClassroomOutcome::Unpriced(unpriced) => breakdown.unpriced.push(unpriced),
        }
    }

    breakdown.total_annual = annualize(breakdown.total_monthly, policy);
    breakdown
}

/// Converts a monthly total to an annual total.
pub fn annualize(total_monthly: Decimal, policy: &SalaryPolicy) -> Decimal {
    total_monthly * policy.months_per_year
}
