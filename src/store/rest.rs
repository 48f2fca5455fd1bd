//! BaaS REST data source.
//!
//! Talks to a PostgREST-style endpoint (`/rest/v1/<table>`) with the
//! project's API key and, when one is configured, a user access token.
//! Row-level security on the hosted side decides what the token can see.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Classroom, DataKind, Payment, PaymentUpdate, PricingRate, PricingUpdate, StudentEnrollment,
    Teacher,
};

use super::AdminDataSource;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;
const TEACHER_SELECT: &str = "*,users(first_name,last_name,email,phone)";

/// A data source backed by the hosted BaaS REST API.
pub struct RestSource {
    http: reqwest::Client,
    base_url: String,
}

impl RestSource {
    /// Creates a client for the project at `base_url`.
    ///
    /// Requests authenticate with `access_token` when given, otherwise
    /// with the API key itself.
    pub fn new(base_url: &str, api_key: &str, access_token: Option<&str>) -> EngineResult<Self> {
        let bearer = format!("Bearer {}", access_token.unwrap_or(api_key));

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("apikey"),
            header_value(api_key, "api_key")?,
        );
        headers.insert(
            reqwest::header::AUTHORIZATION,
            header_value(&bearer, "access_token")?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| EngineError::DataSource {
                table: "*".to_string(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        table_url(&self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http.request(method, self.table_url(table))
    }

    async fn send(&self, request: RequestBuilder, table: &str) -> EngineResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| source_error(table, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(source_error(
                table,
                format!("HTTP {}: {}", status.as_u16(), body),
            ));
        }
        Ok(response)
    }

    /// Reads a JSON array of rows, skipping rows that do not decode.
    async fn read_rows<T: DeserializeOwned>(&self, response: Response, table: &str) -> EngineResult<Vec<T>> {
        let rows = response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| source_error(table, format!("unexpected response shape: {}", e)))?;
        Ok(decode_rows(rows, table))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        kind: DataKind,
        query: &[(&str, &str)],
    ) -> EngineResult<Vec<T>> {
        let table = kind.table();
        debug!(table, "Fetching table");
        let response = self
            .send(self.request(Method::GET, table).query(query), table)
            .await?;
        self.read_rows(response, table).await
    }

    /// Runs a write filtered by id and returns how many rows it touched.
    async fn write_by_id(&self, request: RequestBuilder, table: &str) -> EngineResult<usize> {
        let response = self
            .send(request.header("Prefer", "return=representation"), table)
            .await?;
        let rows: Vec<serde_json::Value> = self.read_rows(response, table).await?;
        Ok(rows.len())
    }
}

fn header_value(value: &str, field: &str) -> EngineResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| EngineError::ValidationError {
        field: field.to_string(),
        message: "contains characters not allowed in an HTTP header".to_string(),
    })
}

fn source_error(table: &str, message: String) -> EngineError {
    EngineError::DataSource {
        table: table.to_string(),
        message,
    }
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<serde_json::Value>, table: &str) -> Vec<T> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            serde_json::from_value(row)
                .map_err(|e| warn!(table, index, error = %e, "Skipping row that failed to decode"))
                .ok()
        })
        .collect()
}

fn table_url(base_url: &str, table: &str) -> String {
    format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table)
}

/// Builds a PostgREST equality filter value.
fn eq_filter(value: &str) -> String {
    format!("eq.{}", value)
}

#[async_trait]
impl AdminDataSource for RestSource {
    async fn fetch_classrooms(&self) -> EngineResult<Vec<Classroom>> {
        self.select(
            DataKind::Classrooms,
            &[("select", "*"), ("order", "created_at.desc")],
        )
        .await
    }

    async fn fetch_teachers(&self) -> EngineResult<Vec<Teacher>> {
        self.select(DataKind::Teachers, &[("select", TEACHER_SELECT)])
            .await
    }

    async fn fetch_students(&self) -> EngineResult<Vec<StudentEnrollment>> {
        self.select(
            DataKind::Students,
            &[
                ("select", "student_id,classroom_id,status"),
                ("status", "eq.active"),
            ],
        )
        .await
    }

    async fn fetch_pricing_rates(&self) -> EngineResult<Vec<PricingRate>> {
        self.select(
            DataKind::Pricing,
            &[("select", "*"), ("order", "grade_level.asc")],
        )
        .await
    }

    async fn fetch_payments(&self) -> EngineResult<Vec<Payment>> {
        self.select(
            DataKind::Payments,
            &[("select", "*"), ("order", "created_at.desc")],
        )
        .await
    }

    async fn insert_pricing_rate(&self, rate: &PricingRate) -> EngineResult<PricingRate> {
        let table = DataKind::Pricing.table();
        let request = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(rate);
        let response = self.send(request, table).await?;
        let mut rows: Vec<PricingRate> = self.read_rows(response, table).await?;
        rows.pop()
            .ok_or_else(|| source_error(table, "insert returned no row".to_string()))
    }

    async fn update_pricing_rate(&self, id: &str, update: &PricingUpdate) -> EngineResult<()> {
        let table = DataKind::Pricing.table();
        let request = self
            .request(Method::PATCH, table)
            .query(&[("id", eq_filter(id))])
            .json(update);
        match self.write_by_id(request, table).await? {
            0 => Err(EngineError::PricingNotFound { id: id.to_string() }),
            _ => Ok(()),
        }
    }

    async fn delete_pricing_rate(&self, id: &str) -> EngineResult<()> {
        let table = DataKind::Pricing.table();
        let request = self
            .request(Method::DELETE, table)
            .query(&[("id", eq_filter(id))]);
        match self.write_by_id(request, table).await? {
            0 => Err(EngineError::PricingNotFound { id: id.to_string() }),
            _ => Ok(()),
        }
    }

    async fn update_payment(&self, id: &str, update: &PaymentUpdate) -> EngineResult<()> {
        let table = DataKind::Payments.table();
        let request = self
            .request(Method::PATCH, table)
            .query(&[("id", eq_filter(id))])
            .json(update);
        match self.write_by_id(request, table).await? {
            0 => Err(EngineError::PaymentNotFound { id: id.to_string() }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_trims_trailing_slash() {
        assert_eq!(
            table_url("https://project.example.co/", "classrooms"),
            "https://project.example.co/rest/v1/classrooms"
        );
    }

    #[test]
    fn test_decode_rows_skips_unknown_payment_status() {
        let rows = vec![
            serde_json::json!({ "id": "pay_1", "student_id": "s1", "amount": "1400", "status": "pending" }),
            serde_json::json!({ "id": "pay_2", "student_id": "s2", "amount": "1400", "status": "approved" }),
        ];

        let payments: Vec<Payment> = decode_rows(rows, "payments");
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].id, "pay_1");
    }

    #[test]
    fn test_decode_rows_keeps_teachers_around_a_bad_row() {
        let rows = vec![
            serde_json::json!({ "id": "t1", "status": "active" }),
            serde_json::json!({ "status": "active" }),
            serde_json::json!({ "id": "t3", "status": "on_leave" }),
        ];

        let teachers: Vec<Teacher> = decode_rows(rows, "teachers");
        let ids: Vec<&str> = teachers.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t1", "t3"]);
        assert!(!teachers[1].is_active());
    }

    #[test]
    fn test_eq_filter() {
        assert_eq!(eq_filter("pay_001"), "eq.pay_001");
    }

    #[test]
    fn test_new_rejects_header_breaking_key() {
        let result = RestSource::new("https://project.example.co", "bad\nkey", None);
        match result {
            Err(EngineError::ValidationError { field, .. }) => assert_eq!(field, "api_key"),
            Err(other) => panic!("Expected ValidationError, got {:?}", other),
            Ok(_) => panic!("Expected ValidationError, got a client"),
        }
    }

    #[test]
    fn test_new_builds_client_for_valid_settings() {
        let source = RestSource::new("https://project.example.co/", "anon-key", Some("jwt"));
        let source = source.unwrap();
        assert_eq!(
            source.table_url("payments"),
            "https://project.example.co/rest/v1/payments"
        );
    }
}
