//! In-memory data source.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdminData, Classroom, Payment, PaymentUpdate, PricingRate, PricingUpdate, StudentEnrollment,
    Teacher,
};

use super::AdminDataSource;

/// Holds every table in memory.
///
/// Used by tests and by the server when no BaaS is configured, in which
/// case it starts from the seed pricing in the configuration directory.
#[derive(Debug, Default)]
pub struct InMemorySource {
    data: RwLock<AdminData>,
}

impl InMemorySource {
    /// Creates a source holding the given tables.
    pub fn new(data: AdminData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Creates a source holding only pricing entries.
    pub fn with_pricing(pricing_rates: Vec<PricingRate>) -> Self {
        Self::new(AdminData {
            pricing_rates,
            ..AdminData::default()
        })
    }
}

#[async_trait]
impl AdminDataSource for InMemorySource {
    async fn fetch_classrooms(&self) -> EngineResult<Vec<Classroom>> {
        Ok(self.data.read().await.classrooms.clone())
    }

    async fn fetch_teachers(&self) -> EngineResult<Vec<Teacher>> {
        Ok(self.data.read().await.teachers.clone())
    }

    async fn fetch_students(&self) -> EngineResult<Vec<StudentEnrollment>> {
        Ok(self.data.read().await.students.clone())
    }

    async fn fetch_pricing_rates(&self) -> EngineResult<Vec<PricingRate>> {
        Ok(self.data.read().await.pricing_rates.clone())
    }

    async fn fetch_payments(&self) -> EngineResult<Vec<Payment>> {
        Ok(self.data.read().await.payments.clone())
    }

    async fn insert_pricing_rate(&self, rate: &PricingRate) -> EngineResult<PricingRate> {
        let mut data = self.data.write().await;
        if data.pricing_rates.iter().any(|r| r.id == rate.id) {
            return Err(EngineError::DataSource {
                table: "grade_subject_pricing".to_string(),
                message: format!("duplicate id {}", rate.id),
            });
        }
        data.pricing_rates.push(rate.clone());
        Ok(rate.clone())
    }

    async fn update_pricing_rate(&self, id: &str, update: &PricingUpdate) -> EngineResult<()> {
        let mut data = self.data.write().await;
        let rate = data
            .pricing_rates
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| EngineError::PricingNotFound { id: id.to_string() })?;
        rate.apply(update);
        Ok(())
    }

    async fn delete_pricing_rate(&self, id: &str) -> EngineResult<()> {
        let mut data = self.data.write().await;
        let before = data.pricing_rates.len();
        data.pricing_rates.retain(|r| r.id != id);
        if data.pricing_rates.len() == before {
            return Err(EngineError::PricingNotFound { id: id.to_string() });
        }
        Ok(())
    }

    async fn update_payment(&self, id: &str, update: &PaymentUpdate) -> EngineResult<()> {
        let mut data = self.data.write().await;
        let payment = data
            .payments
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::PaymentNotFound { id: id.to_string() })?;
        payment.apply(update);
        Ok(())
    }
}
