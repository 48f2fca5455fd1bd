//! Payment models for the manual payment review workflow.
//!
//! Students pay out of band and upload a screenshot as proof. An
//! administrator then approves the payment (setting an access expiry date)
//! or declines it with a reason.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Review status of a payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Submitted and awaiting review.
    #[default]
    Pending,
    /// Approved by an administrator.
    Completed,
    /// Rejected by an administrator.
    Declined,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Declined => "declined",
        };
        f.write_str(s)
    }
}

/// A payment row as shown on the approvals screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for the payment.
    pub id: String,
    /// The paying student.
    pub student_id: String,
    /// Student display name.
    #[serde(default)]
    pub student_name: String,
    /// Student email.
    #[serde(default)]
    pub student_email: String,
    /// The classroom paid for.
    #[serde(default)]
    pub classroom_id: Option<String>,
    /// Classroom display name.
    #[serde(default)]
    pub classroom_name: String,
    /// Amount paid.
    pub amount: Decimal,
    /// How the student paid (e.g., "upi").
    #[serde(default)]
    pub payment_method: Option<String>,
    /// External transaction reference.
    #[serde(default)]
    pub transaction_id: Option<String>,
    /// Storage path of the uploaded proof screenshot.
    #[serde(default)]
    pub screenshot_url: Option<String>,
    /// Number of months of access purchased.
    #[serde(default = "default_period")]
    pub time_period_months: u32,
    /// Review status.
    #[serde(default)]
    pub status: PaymentStatus,
    /// When access expires, set on approval.
    #[serde(default)]
    pub expire_at: Option<NaiveDate>,
    /// Reviewer remarks, set on decline.
    #[serde(default)]
    pub remarks: Option<String>,
    /// When the payment was submitted.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_period() -> u32 {
    1
}

impl Payment {
    /// Returns true if the payment still awaits review.
    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }

    /// Case-insensitive match on student name, email, id or classroom name.
    ///
    /// An empty term matches every payment.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [
            self.student_name.as_str(),
            self.student_email.as_str(),
            self.student_id.as_str(),
            self.classroom_name.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }

    /// Applies a review decision to this payment.
    pub fn apply(&mut self, update: &PaymentUpdate) {
        self.status = update.status;
        if update.expire_at.is_some() {
            self.expire_at = update.expire_at;
        }
        if update.remarks.is_some() {
            self.remarks = update.remarks.clone();
        }
    }
}

/// The fields written back to the `payments` table by a review decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    /// The new status.
    pub status: PaymentStatus,
    /// Access expiry, present on approval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<NaiveDate>,
    /// Decline reason, present on decline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    /// When the decision was made.
    pub updated_at: DateTime<Utc>,
}
