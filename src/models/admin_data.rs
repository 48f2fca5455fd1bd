//! The admin back-office data snapshot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Classroom, Payment, PricingRate, StudentEnrollment, Teacher};

/// The tables the admin store loads and refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// The `classrooms` table.
    Classrooms,
    /// The `teachers` table.
    Teachers,
    /// The `student_enrollments` table.
    Students,
    /// The `grade_subject_pricing` table.
    Pricing,
    /// The `payments` table.
    Payments,
}

impl DataKind {
    /// Every kind, in load order.
    pub const ALL: [DataKind; 5] = [
        DataKind::Classrooms,
        DataKind::Teachers,
        DataKind::Students,
        DataKind::Pricing,
        DataKind::Payments,
    ];

    /// The backing table name.
    pub fn table(&self) -> &'static str {
        match self {
            DataKind::Classrooms => "classrooms",
            DataKind::Teachers => "teachers",
            DataKind::Students => "student_enrollments",
            DataKind::Pricing => "grade_subject_pricing",
            DataKind::Payments => "payments",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataKind::Classrooms => "classrooms",
            DataKind::Teachers => "teachers",
            DataKind::Students => "students",
            DataKind::Pricing => "pricing",
            DataKind::Payments => "payments",
        };
        f.write_str(s)
    }
}

impl FromStr for DataKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classrooms" => Ok(DataKind::Classrooms),
            "teachers" => Ok(DataKind::Teachers),
            "students" => Ok(DataKind::Students),
            "pricing" => Ok(DataKind::Pricing),
            "payments" => Ok(DataKind::Payments),
            other => Err(format!("Unknown data kind: {}", other)),
        }
    }
}

/// Headline counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Classrooms flagged active.
    pub total_classrooms: usize,
    /// Teachers with active status.
    pub total_teachers: usize,
    /// Distinct students with at least one active enrollment.
    pub total_students: usize,
    /// Payments awaiting review.
    pub pending_payments: usize,
}

/// A complete snapshot of every table the back-office works from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminData {
    /// All classrooms, active and inactive.
    pub classrooms: Vec<Classroom>,
    /// All teachers.
    pub teachers: Vec<Teacher>,
    /// Student enrollments.
    pub students: Vec<StudentEnrollment>,
    /// Grade/board pricing entries.
    pub pricing_rates: Vec<PricingRate>,
    /// Submitted payments.
    pub payments: Vec<Payment>,
    /// Counts derived from the tables above.
    pub stats: DashboardStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_kind_parses_case_insensitively() {
        assert_eq!("Pricing".parse::<DataKind>().unwrap(), DataKind::Pricing);
        assert_eq!("payments".parse::<DataKind>().unwrap(), DataKind::Payments);
        assert!("audit_logs".parse::<DataKind>().is_err());
    }

    #[test]
    fn test_data_kind_tables() {
        assert_eq!(DataKind::Students.table(), "student_enrollments");
        assert_eq!(DataKind::Pricing.table(), "grade_subject_pricing");
    }

    #[test]
    fn test_data_kind_display_round_trips_through_from_str() {
        for kind in DataKind::ALL {
            assert_eq!(kind.to_string().parse::<DataKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_data_kind_deserializes_snake_case() {
        let kind: DataKind = serde_json::from_str("\"classrooms\"").unwrap();
        assert_eq!(kind, DataKind::Classrooms);
    }
}
