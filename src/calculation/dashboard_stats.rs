//! Dashboard statistics.

use std::collections::HashSet;

use crate::models::{Classroom, DashboardStats, Payment, RecordStatus, StudentEnrollment, Teacher};

/// Computes the dashboard's headline counts.
///
/// Students are counted once each even when enrolled in several
/// classrooms, and only through active enrollments.
pub fn compute_stats(
    classrooms: &[Classroom],
    teachers: &[Teacher],
    students: &[StudentEnrollment],
    payments: &[Payment],
) -> DashboardStats {
    let active_students: HashSet<&str> = students
        .iter()
        .filter(|s| s.status == RecordStatus::Active)
        .map(|s| s.student_id.as_str())
        .collect();

    DashboardStats {
        total_classrooms: classrooms.iter().filter(|c| c.is_active).count(),
        total_teachers: teachers.iter().filter(|t| t.is_active()).count(),
        total_students: active_students.len(),
        pending_payments: payments.iter().filter(|p| p.is_pending()).count(),
    }
}
