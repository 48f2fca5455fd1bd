//! Salary result models.
//!
//! This module contains the per-classroom [`ClassroomSalary`] breakdown,
//! the [`ClassroomOutcome`] sum type that makes missing pricing explicit,
//! and the per-teacher [`SalaryBreakdown`] and [`TeacherSalary`] aggregates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Salary earned from one priced classroom.
///
/// # Example
///
/// ```
/// use learned_payroll::models::ClassroomSalary;
/// use rust_decimal::Decimal;
///
/// let detail = ClassroomSalary {
///     classroom_id: "c1".to_string(),
///     classroom_name: "Grade 8 Physics".to_string(),
///     grade: Some(8),
///     subject: Some("Physics".to_string()),
///     student_count: 3,
///     base_fee: Decimal::new(1400, 0),
///     salary_contribution: Decimal::new(2100, 0),
///     monthly_salary: Decimal::new(2100, 0),
/// };
/// assert_eq!(detail.monthly_salary, Decimal::new(2100, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassroomSalary {
    /// The classroom id.
    pub classroom_id: String,
    /// The classroom display name.
    pub classroom_name: String,
    /// The classroom's grade level.
    pub grade: Option<u32>,
    /// The classroom's subject.
    pub subject: Option<String>,
    /// Number of enrollments counted.
    pub student_count: usize,
    /// The monthly fee from the pricing table.
    pub base_fee: Decimal,
    /// Tiered share of the fee summed over all students, before duration normalization.
    pub salary_contribution: Decimal,
    /// Contribution scaled by the pricing duration over the base hours.
    pub monthly_salary: Decimal,
}

/// Why a classroom could not be priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnpricedReason {
    /// No pricing entry carries the classroom's grade/board key.
    MissingPricingRate {
        /// The key that was looked up.
        key: String,
    },
}

/// A classroom left out of a salary total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpricedClassroom {
    /// The classroom id.
    pub classroom_id: String,
    /// The classroom display name.
    pub classroom_name: String,
    /// Why it was left out.
    pub reason: UnpricedReason,
}

/// The result of pricing one classroom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassroomOutcome {
    /// The classroom was priced and contributes to the total.
    Priced(ClassroomSalary),
    /// The classroom contributes nothing.
    Unpriced(UnpricedClassroom),
}

impl ClassroomOutcome {
    /// The amount this classroom adds to the monthly total.
    pub fn monthly_salary(&self) -> Decimal {
        match self {
            ClassroomOutcome::Priced(detail) => detail.monthly_salary,
            ClassroomOutcome::Unpriced(_) => Decimal::ZERO,
        }
    }
}

/// A teacher's salary across all of their classrooms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Sum of every priced classroom's monthly salary.
    pub total_monthly: Decimal,
    /// Monthly total times the months per year.
    pub total_annual: Decimal,
    /// Priced classrooms, in input order.
    pub classroom_details: Vec<ClassroomSalary>,
    /// Classrooms left out of the total.
    pub unpriced: Vec<UnpricedClassroom>,
}

/// A row of the salary report: one teacher with identity and breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherSalary {
    /// The teacher id.
    pub teacher_id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// The salary breakdown.
    #[serde(flatten)]
    pub breakdown: SalaryBreakdown,
}

impl TeacherSalary {
    /// Case-insensitive match on name or email; an empty term matches all.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.email.to_lowercase().contains(&term)
    }
}
