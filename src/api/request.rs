//! Request types for the payroll API.
//!
//! This module defines the JSON bodies and query strings the handlers
//! accept.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Classroom, DataKind, PaymentStatus, PricingRate, StudentEnrollment};

/// Request body for the `/salary/calculate` endpoint.
///
/// Carries everything the calculator needs, so the result does not depend
/// on the store's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryCalculationRequest {
    /// The teacher to calculate for.
    pub teacher_id: String,
    /// Classrooms to consider; only the teacher's are priced.
    #[serde(default)]
    pub classrooms: Vec<Classroom>,
    /// Student enrollments.
    #[serde(default)]
    pub students: Vec<StudentEnrollment>,
    /// Grade/board pricing entries.
    #[serde(default)]
    pub pricing_rates: Vec<PricingRate>,
}

/// Query string for `/salary/report`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalaryReportQuery {
    /// Case-insensitive name or email filter.
    #[serde(default)]
    pub search: Option<String>,
}

/// Request body for `/admin/refresh`.
///
/// Without a kind every table is reloaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// The single table to refresh.
    #[serde(default)]
    pub kind: Option<DataKind>,
}

/// Query string for `GET /pricing`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingQuery {
    /// Only entries for this grade.
    #[serde(default)]
    pub grade: Option<u32>,
    /// Only entries for this board.
    #[serde(default)]
    pub board: Option<String>,
}

/// Request body for `POST /pricing`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRequest {
    /// Grade level (1-12).
    pub grade_level: u32,
    /// Education board.
    pub board: String,
    /// Subject label.
    #[serde(default = "default_subject")]
    pub subject: String,
    /// Monthly fee per student.
    pub fee_per_month: Decimal,
    /// Teaching hours per month.
    pub duration_per_month: Decimal,
    /// Optional hourly fee.
    #[serde(default)]
    pub fee_per_hour: Option<Decimal>,
}

fn default_subject() -> String {
    "All".to_string()
}

impl From<PricingRequest> for PricingRate {
    fn from(req: PricingRequest) -> Self {
        PricingRate {
            id: Uuid::new_v4().to_string(),
            grade_level: req.grade_level,
            board: req.board.trim().to_string(),
            subject: req.subject,
            fee_per_month: req.fee_per_month,
            duration_per_month: req.duration_per_month,
            fee_per_hour: req.fee_per_hour,
            is_active: true,
        }
    }
}

/// Query string for `GET /payments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentQuery {
    /// Only payments with this status.
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    /// Free-text filter over student and classroom fields.
    #[serde(default)]
    pub search: Option<String>,
}

/// Request body for `/payments/:id/approve`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApproveRequest {
    /// Access expiry; defaults to today plus the purchased period.
    #[serde(default)]
    pub expire_at: Option<NaiveDate>,
}

/// Request body for `/payments/:id/decline`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclineRequest {
    /// Why the payment was declined.
    pub reason: String,
}
