//! Teacher and user profile models.

use serde::{Deserialize, Serialize};

/// Lifecycle status shared by teacher and student rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// The record is active.
    #[default]
    Active,
    /// The record has been deactivated.
    Inactive,
    /// The record is awaiting activation (e.g., an invited teacher).
    Pending,
    /// The record has been suspended by an administrator.
    Suspended,
    /// Any other status the back office has recorded; treated as not active.
    #[serde(other)]
    Other,
}

/// The `users` row joined onto teacher and student records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

/// A teacher as stored in the `teachers` table with its joined user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique identifier for the teacher.
    pub id: String,
    /// The user account backing this teacher.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Current status.
    #[serde(default)]
    pub status: RecordStatus,
    /// Joined user profile, if the join returned one.
    #[serde(default)]
    pub users: Option<UserProfile>,
}

impl Teacher {
    /// Returns "first last", trimmed, with missing parts left out.
    ///
    /// # Examples
    ///
    /// ```
    /// use learned_payroll::models::{RecordStatus, Teacher, UserProfile};
    ///
    /// let teacher = Teacher {
    ///     id: "t1".to_string(),
    ///     user_id: None,
    ///     status: RecordStatus::Active,
    ///     users: Some(UserProfile {
    ///         first_name: Some("Asha".to_string()),
    ///         last_name: None,
    ///         email: None,
    ///         phone: None,
    ///     }),
    /// };
    /// assert_eq!(teacher.display_name(), "Asha");
    /// ```
    pub fn display_name(&self) -> String {
        let profile = self.users.as_ref();
        let first = profile.and_then(|u| u.first_name.as_deref()).unwrap_or("");
        let last = profile.and_then(|u| u.last_name.as_deref()).unwrap_or("");
        format!("{} {}", first, last).trim().to_string()
    }

    /// Returns the teacher's email, or an empty string when unknown.
    pub fn email(&self) -> &str {
        self.users
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .unwrap_or("")
    }

    /// Returns true if the teacher is active.
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_teacher_with_joined_user() {
        let json = r#"{
            "id": "t1",
            "user_id": "u1",
            "status": "active",
            "users": {
                "first_name": "Asha",
                "last_name": "Rao",
                "email": "asha@example.com",
                "phone": null
            }
        }"#;

        let teacher: Teacher = serde_json::from_str(json).unwrap();
        assert_eq!(teacher.display_name(), "Asha Rao");
        assert_eq!(teacher.email(), "asha@example.com");
        assert!(teacher.is_active());
    }

    #[test]
    fn test_teacher_without_profile_has_empty_name_and_email() {
        let json = r#"{ "id": "t2", "status": "inactive" }"#;

        let teacher: Teacher = serde_json::from_str(json).unwrap();
        assert_eq!(teacher.display_name(), "");
        assert_eq!(teacher.email(), "");
        assert!(!teacher.is_active());
    }

    #[test]
    fn test_missing_status_defaults_to_active() {
        let teacher: Teacher = serde_json::from_str(r#"{ "id": "t3" }"#).unwrap();
        assert_eq!(teacher.status, RecordStatus::Active);
    }

    #[test]
    fn test_unlisted_status_reads_as_other() {
        let teacher: Teacher =
            serde_json::from_str(r#"{ "id": "t4", "status": "on_leave" }"#).unwrap();
        assert_eq!(teacher.status, RecordStatus::Other);
        assert!(!teacher.is_active());
    }

    #[test]
    fn test_name_with_missing_part_has_no_padding() {
        let teacher = Teacher {
            id: "t5".to_string(),
            user_id: None,
            status: RecordStatus::Active,
            users: Some(UserProfile {
                first_name: None,
                last_name: Some("Rao".to_string()),
                email: None,
                phone: None,
            }),
        };
        assert_eq!(teacher.display_name(), "Rao");
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&RecordStatus::Suspended).unwrap(),
            "\"suspended\""
        );
        let status: RecordStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, RecordStatus::Pending);
    }
}
