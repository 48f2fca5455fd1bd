//! Classroom model.

use serde::{Deserialize, Serialize};

use super::PricingKey;

/// A classroom as stored in the `classrooms` table.
///
/// Grade, board and teacher are optional at the boundary: rows created
/// before a teacher was assigned or with incomplete data still load, and
/// simply never match a teacher or a pricing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique identifier for the classroom.
    pub id: String,
    /// Display name of the classroom.
    pub name: String,
    /// The teacher assigned to the classroom.
    #[serde(default)]
    pub teacher_id: Option<String>,
    /// The grade level taught.
    #[serde(default)]
    pub grade_level: Option<u32>,
    /// The education board (e.g., "CBSE").
    #[serde(default)]
    pub board: Option<String>,
    /// The subject taught.
    #[serde(default)]
    pub subject: Option<String>,
    /// Whether the classroom is running.
    #[serde(default)]
    pub is_active: bool,
}

impl Classroom {
    /// Returns the grade/board key used to find this classroom's pricing.
    ///
    /// # Examples
    ///
    /// ```
    /// use learned_payroll::models::Classroom;
    ///
    /// let classroom = Classroom {
    ///     id: "c1".to_string(),
    ///     name: "Grade 8 Maths".to_string(),
    ///     teacher_id: Some("t1".to_string()),
    ///     grade_level: Some(8),
    ///     board: Some("CBSE".to_string()),
    ///     subject: Some("Mathematics".to_string()),
    ///     is_active: true,
    /// };
    /// assert_eq!(classroom.pricing_key().as_str(), "8_CBSE");
    /// ```
    pub fn pricing_key(&self) -> PricingKey {
        PricingKey::new(self.grade_level, self.board.as_deref())
    }

    /// Returns true if the classroom is assigned to the given teacher.
    pub fn is_taught_by(&self, teacher_id: &str) -> bool {
        self.teacher_id.as_deref() == Some(teacher_id)
    }
}
