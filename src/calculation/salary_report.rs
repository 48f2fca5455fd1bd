//! Salary report across all teachers.

use crate::config::SalaryPolicy;
use crate::models::{Classroom, PricingTable, StudentEnrollment, Teacher, TeacherSalary};

use super::teacher_salary::{calculate_with_counts, enrollment_counts};

/// Computes every teacher's salary, in roster order.
///
/// Enrollment counts and the pricing table are built once and shared by
/// every teacher's calculation.
pub fn build_salary_report(
    teachers: &[Teacher],
    classrooms: &[Classroom],
    students: &[StudentEnrollment],
    pricing: &PricingTable,
    policy: &SalaryPolicy,
) -> Vec<TeacherSalary> {
    let counts = enrollment_counts(students);

    teachers
        .iter()
        .map(|teacher| TeacherSalary {
            teacher_id: teacher.id.clone(),
            name: teacher.display_name(),
            email: teacher.email().to_string(),
            breakdown: calculate_with_counts(&teacher.id, classrooms, &counts, pricing, policy),
        })
        .collect()
}

/// Keeps the rows whose name or email contains the search term.
pub fn filter_salary_report<'a>(report: &'a [TeacherSalary], search: &str) -> Vec<&'a TeacherSalary> {
    report.iter().filter(|row| row.matches_search(search)).collect()
}
