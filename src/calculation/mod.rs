//! Calculation logic for the payroll engine.
//!
//! This module contains the tiered per-student share calculation, duration
//! normalization against the policy's base hours, per-teacher salary
//! aggregation, the all-teacher salary report, manual payment review and
//! dashboard statistics.

mod dashboard_stats;
mod duration;
mod payment_review;
mod salary_report;
mod teacher_salary;
mod tiered_share;

pub use dashboard_stats::compute_stats;
pub use duration::{duration_factor, normalize_to_base_hours};
pub use payment_review::{approve_payment, decline_payment, default_expiry_date, filter_payments};
pub use salary_report::{build_salary_report, filter_salary_report};
pub use teacher_salary::{annualize, calculate_teacher_salary, enrollment_counts, price_classroom};
pub use tiered_share::{
    calculate_classroom_salary, student_contributions, student_percentage, tiered_percentage_sum,
};
