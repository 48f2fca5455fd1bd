//! Manual payment review.
//!
//! This module turns an administrator's decision on a submitted payment
//! into the [`PaymentUpdate`] written back to the payments table. Only
//! pending payments can be reviewed.

use chrono::{DateTime, Months, NaiveDate, Utc};

use crate::error::{EngineError, EngineResult};
use crate::models::{Payment, PaymentStatus, PaymentUpdate};

/// Returns the access expiry for a payment approved on `today`.
///
/// Adds whole calendar months; a day that does not exist in the target
/// month is clamped to that month's last day (Jan 31 + 1 month = Feb 28).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use learned_payroll::calculation::default_expiry_date;
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
/// let expiry = default_expiry_date(today, 1).unwrap();
/// assert_eq!(expiry, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// ```
pub fn default_expiry_date(today: NaiveDate, months: u32) -> EngineResult<NaiveDate> {
    today
        .checked_add_months(Months::new(months))
        .ok_or_else(|| EngineError::ValidationError {
            field: "time_period_months".to_string(),
            message: format!("{} months from {} is out of range", months, today),
        })
}

fn ensure_pending(payment: &Payment, action: &str) -> EngineResult<()> {
    if payment.is_pending() {
        return Ok(());
    }
    Err(EngineError::InvalidPaymentTransition {
        id: payment.id.clone(),
        action: action.to_string(),
        status: payment.status.to_string(),
    })
}

/// Approves a pending payment.
///
/// Without an explicit expiry the payment's purchased period is added to
/// the approval date. The expiry must fall after the approval date.
pub fn approve_payment(
    payment: &Payment,
    expire_at: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> EngineResult<PaymentUpdate> {
    ensure_pending(payment, "approved")?;

    let today = now.date_naive();
    let expire_at = match expire_at {
        Some(date) => date,
        None => default_expiry_date(today, payment.time_period_months)?,
    };
    if expire_at <= today {
        return Err(EngineError::ValidationError {
            field: "expire_at".to_string(),
            message: format!("expiry {} must be after {}", expire_at, today),
        });
    }

    Ok(PaymentUpdate {
        status: PaymentStatus::Completed,
        expire_at: Some(expire_at),
        remarks: None,
        updated_at: now,
    })
}

/// Declines a pending payment with a reason shown to the student.
pub fn decline_payment(
    payment: &Payment,
    reason: &str,
    now: DateTime<Utc>,
) -> EngineResult<PaymentUpdate> {
    ensure_pending(payment, "declined")?;

    let reason = reason.trim();
    if reason.is_empty() {
        return Err(EngineError::ValidationError {
            field: "reason".to_string(),
            message: "a reason is required to decline a payment".to_string(),
        });
    }

    Ok(PaymentUpdate {
        status: PaymentStatus::Declined,
        expire_at: None,
        remarks: Some(reason.to_string()),
        updated_at: now,
    })
}

/// Filters payments by optional status and a free-text search.
pub fn filter_payments<'a>(
    payments: &'a [Payment],
    status: Option<PaymentStatus>,
    search: &str,
) -> Vec<&'a Payment> {
    payments
        .iter()
        .filter(|p| status.is_none_or(|s| p.status == s))
        .filter(|p| p.matches_search(search))
        .collect()
}
