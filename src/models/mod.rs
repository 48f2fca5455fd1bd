//! Core data models for the payroll engine.
//!
//! This module contains the typed records loaded from the back-office
//! tables and the salary results derived from them.

mod admin_data;
mod classroom;
mod payment;
mod pricing;
mod salary_result;
mod student;
mod teacher;

pub use admin_data::{AdminData, DashboardStats, DataKind};
pub use classroom::Classroom;
pub use payment::{Payment, PaymentStatus, PaymentUpdate};
pub use pricing::{PricingKey, PricingRate, PricingTable, PricingUpdate, filter_rates};
pub use salary_result::{
    ClassroomOutcome, ClassroomSalary, SalaryBreakdown, TeacherSalary, UnpricedClassroom,
    UnpricedReason,
};
pub use student::StudentEnrollment;
pub use teacher::{RecordStatus, Teacher, UserProfile};
