//! Student enrollment model.

use serde::{Deserialize, Serialize};

use super::RecordStatus;

/// One student's membership in one classroom (`student_enrollments` row).
///
/// A student enrolled in three classrooms appears as three records. Only
/// the number of records per classroom matters to salary calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentEnrollment {
    /// The enrolled student.
    pub student_id: String,
    /// The classroom the student is enrolled in.
    #[serde(default)]
    pub classroom_id: Option<String>,
    /// Enrollment status.
    #[serde(default)]
    pub status: RecordStatus,
}

impl StudentEnrollment {
    /// Returns true if this enrollment belongs to the given classroom.
    pub fn is_in(&self, classroom_id: &str) -> bool {
        self.classroom_id.as_deref() == Some(classroom_id)
    }
}
