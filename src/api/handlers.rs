//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_teacher_salary, filter_payments, filter_salary_report};
use crate::error::EngineError;
use crate::models::{filter_rates, PricingTable, PricingUpdate};

use super::request::{
    ApproveRequest, DeclineRequest, PaymentQuery, PricingQuery, PricingRequest, RefreshRequest,
    SalaryCalculationRequest, SalaryReportQuery,
};
use super::response::{ApiError, ApiErrorResponse, RefreshResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/salary/calculate", post(calculate_salary_handler))
        .route("/salary/report", get(salary_report_handler))
        .route("/teachers/:id/salary", get(teacher_salary_handler))
        .route("/dashboard/stats", get(dashboard_stats_handler))
        .route("/admin/refresh", post(refresh_handler))
        .route(
            "/pricing",
            get(list_pricing_handler).post(create_pricing_handler),
        )
        .route(
            "/pricing/:id",
            put(update_pricing_handler).delete(delete_pricing_handler),
        )
        .route("/payments", get(list_payments_handler))
        .route("/payments/:id/approve", post(approve_payment_handler))
        .route("/payments/:id/decline", post(decline_payment_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Unwraps a JSON body or builds the 400 response for its rejection.
fn parse_json<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(req)) => return Ok(req),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message names the offending field
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(json_response(StatusCode::BAD_REQUEST, error))
}

fn parse_query<T>(
    correlation_id: Uuid,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, Response> {
    query.map(|Query(q)| q).map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Invalid query string"
        );
        json_response(
            StatusCode::BAD_REQUEST,
            ApiError::validation_error(rejection.body_text()),
        )
    })
}

/// Handler for POST /salary/calculate.
///
/// Calculates one teacher's salary from the tables in the request body.
/// Every pricing rate in the body must pass validation first.
async fn calculate_salary_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary calculation request");

    let request = match parse_json(correlation_id, payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    if let Some(err) = request.pricing_rates.iter().find_map(|rate| rate.validate().err()) {
        return error_response(correlation_id, err);
    }

    let start_time = Instant::now();
    let pricing = PricingTable::from_rates(&request.pricing_rates);
    let breakdown = calculate_teacher_salary(
        &request.teacher_id,
        &request.classrooms,
        &request.students,
        &pricing,
        state.config().policy(),
    );

    info!(
        correlation_id = %correlation_id,
        teacher_id = %request.teacher_id,
        classrooms_count = breakdown.classroom_details.len(),
        unpriced_count = breakdown.unpriced.len(),
        total_monthly = %breakdown.total_monthly,
        duration_us = start_time.elapsed().as_micros(),
        "Salary calculation completed"
    );
    json_response(StatusCode::OK, breakdown)
}

/// Handler for GET /salary/report.
async fn salary_report_handler(
    State(state): State<AppState>,
    query: Result<Query<SalaryReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match parse_query(correlation_id, query) {
        Ok(q) => q,
        Err(response) => return response,
    };

    let report = state.store().salary_report().await;
    let rows = filter_salary_report(&report, query.search.as_deref().unwrap_or(""));
    info!(
        correlation_id = %correlation_id,
        teachers = report.len(),
        matched = rows.len(),
        "Salary report built"
    );
    json_response(StatusCode::OK, rows)
}

/// Handler for GET /teachers/:id/salary.
async fn teacher_salary_handler(
    State(state): State<AppState>,
    Path(teacher_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().teacher_salary(&teacher_id).await {
        Ok(salary) => {
            info!(
                correlation_id = %correlation_id,
                teacher_id = %teacher_id,
                total_monthly = %salary.breakdown.total_monthly,
                "Teacher salary calculated"
            );
            json_response(StatusCode::OK, salary)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /dashboard/stats.
async fn dashboard_stats_handler(State(state): State<AppState>) -> Response {
    let data = state.store().load_all(false).await;
    json_response(StatusCode::OK, data.stats)
}

/// Handler for POST /admin/refresh.
///
/// Refreshes one table, or forces a full reload when no kind is given.
async fn refresh_handler(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(correlation_id, payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    let data = match request.kind {
        Some(kind) => match state.store().refresh(kind).await {
            Ok(data) => data,
            Err(err) => return error_response(correlation_id, err),
        },
        None => state.store().load_all(true).await,
    };

    info!(correlation_id = %correlation_id, kind = ?request.kind, "Admin data refreshed");
    json_response(
        StatusCode::OK,
        RefreshResponse {
            kind: request.kind,
            stats: data.stats,
        },
    )
}

/// Handler for GET /pricing.
async fn list_pricing_handler(
    State(state): State<AppState>,
    query: Result<Query<PricingQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match parse_query(correlation_id, query) {
        Ok(q) => q,
        Err(response) => return response,
    };

    let data = state.store().load_all(false).await;
    let rates = filter_rates(&data.pricing_rates, query.grade, query.board.as_deref());
    json_response(StatusCode::OK, rates)
}

/// Handler for POST /pricing.
async fn create_pricing_handler(
    State(state): State<AppState>,
    payload: Result<Json<PricingRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(correlation_id, payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    match state.store().create_pricing(request.into()).await {
        Ok(rate) => {
            info!(correlation_id = %correlation_id, pricing_id = %rate.id, "Pricing created");
            json_response(StatusCode::CREATED, rate)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /pricing/:id.
async fn update_pricing_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PricingUpdate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let update = match parse_json(correlation_id, payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    match state.store().update_pricing(&id, update).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /pricing/:id.
async fn delete_pricing_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().delete_pricing(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /payments.
async fn list_payments_handler(
    State(state): State<AppState>,
    query: Result<Query<PaymentQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match parse_query(correlation_id, query) {
        Ok(q) => q,
        Err(response) => return response,
    };

    let data = state.store().load_all(false).await;
    let payments = filter_payments(
        &data.payments,
        query.status,
        query.search.as_deref().unwrap_or(""),
    );
    json_response(StatusCode::OK, payments)
}

/// Handler for POST /payments/:id/approve.
async fn approve_payment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ApproveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(correlation_id, payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    match state
        .store()
        .approve_payment(&id, request.expire_at, Utc::now())
        .await
    {
        Ok(update) => json_response(StatusCode::OK, update),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payments/:id/decline.
async fn decline_payment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<DeclineRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(correlation_id, payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    match state
        .store()
        .decline_payment(&id, &request.reason, Utc::now())
        .await
    {
        Ok(update) => json_response(StatusCode::OK, update),
        Err(err) => error_response(correlation_id, err),
    }
}
