//! The data source abstraction behind the admin store.

use async_trait::async_trait;

use crate::error::EngineResult;
use crate::models::{
    Classroom, Payment, PaymentUpdate, PricingRate, PricingUpdate, StudentEnrollment, Teacher,
};

/// Reads and writes the back-office tables.
///
/// Implemented by [`RestSource`](super::RestSource) for the hosted BaaS and
/// by [`InMemorySource`](super::InMemorySource) for tests and offline use.
#[async_trait]
pub trait AdminDataSource: Send + Sync {
    /// All classrooms, newest first.
    async fn fetch_classrooms(&self) -> EngineResult<Vec<Classroom>>;

    /// All teachers with their user profiles.
    async fn fetch_teachers(&self) -> EngineResult<Vec<Teacher>>;

    /// Active student enrollments.
    async fn fetch_students(&self) -> EngineResult<Vec<StudentEnrollment>>;

    /// Grade/board pricing entries.
    async fn fetch_pricing_rates(&self) -> EngineResult<Vec<PricingRate>>;

    /// Submitted payments, newest first.
    async fn fetch_payments(&self) -> EngineResult<Vec<Payment>>;

    /// Inserts a pricing entry and returns it as stored.
    async fn insert_pricing_rate(&self, rate: &PricingRate) -> EngineResult<PricingRate>;

    /// Updates the editable fields of a pricing entry.
    async fn update_pricing_rate(&self, id: &str, update: &PricingUpdate) -> EngineResult<()>;

    /// Deletes a pricing entry.
    async fn delete_pricing_rate(&self, id: &str) -> EngineResult<()>;

    /// Writes a review decision to a payment.
    async fn update_payment(&self, id: &str, update: &PaymentUpdate) -> EngineResult<()>;
}
