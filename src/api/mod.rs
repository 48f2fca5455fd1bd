//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for teacher salaries, the
//! dashboard, pricing management and payment review.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ApproveRequest, DeclineRequest, PaymentQuery, PricingQuery, PricingRequest, RefreshRequest,
    SalaryCalculationRequest, SalaryReportQuery,
};
pub use response::{ApiError, RefreshResponse};
pub use state::AppState;
