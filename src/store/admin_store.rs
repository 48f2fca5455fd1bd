//! The admin data store.
//!
//! [`AdminStore`] owns the current [`AdminData`] snapshot and the rules for
//! keeping it fresh: a full load that happens once unless forced, and
//! single-table refreshes after every write. Readers get an `Arc` to a
//! complete snapshot; a load or refresh builds a new snapshot and swaps it
//! in whole.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::calculation::{
    approve_payment, build_salary_report, calculate_teacher_salary, compute_stats,
    decline_payment,
};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdminData, DataKind, PaymentUpdate, PricingRate, PricingTable, PricingUpdate, TeacherSalary,
};

use super::AdminDataSource;

#[derive(Default)]
struct StoreState {
    data: Arc<AdminData>,
    loaded: bool,
}

/// Shared back-office state with an explicit load/refresh contract.
pub struct AdminStore {
    source: Arc<dyn AdminDataSource>,
    config: Arc<ConfigLoader>,
    state: RwLock<StoreState>,
    load_lock: Mutex<()>,
}

/// Logs a failed table fetch and substitutes an empty table.
fn or_empty<T>(result: EngineResult<Vec<T>>, kind: DataKind) -> Vec<T> {
    result.unwrap_or_else(|err| {
        warn!(table = kind.table(), error = %err, "Failed to load table; using empty data");
        Vec::new()
    })
}

/// Drops pricing rows that fail validation so they never reach the calculator.
fn usable_pricing(rows: Vec<PricingRate>) -> Vec<PricingRate> {
    rows.into_iter()
        .filter(|rate| match rate.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(pricing_id = %rate.id, error = %e, "Skipping invalid pricing row");
                false
            }
        })
        .collect()
}

impl AdminStore {
    /// Creates an empty, unloaded store over a data source.
    pub fn new(source: Arc<dyn AdminDataSource>, config: Arc<ConfigLoader>) -> Self {
        Self {
            source,
            config,
            state: RwLock::new(StoreState::default()),
            load_lock: Mutex::new(()),
        }
    }

    /// Returns the configuration the store validates against.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the current snapshot, loaded or not.
    pub async fn snapshot(&self) -> Arc<AdminData> {
        Arc::clone(&self.state.read().await.data)
    }

    /// Returns true once a full load has completed.
    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.loaded
    }

    /// Loads every table.
    ///
    /// Does nothing when data is already loaded and `force` is false.
    /// Concurrent callers share one load. A table that fails to load is
    /// logged and left empty; the load itself still succeeds.
    pub async fn load_all(&self, force: bool) -> Arc<AdminData> {
        let _guard = self.load_lock.lock().await;
        if !force && self.is_loaded().await {
            return self.snapshot().await;
        }

        let (classrooms, teachers, students, pricing_rates, payments) = tokio::join!(
            self.source.fetch_classrooms(),
            self.source.fetch_teachers(),
            self.source.fetch_students(),
            self.source.fetch_pricing_rates(),
            self.source.fetch_payments(),
        );

        let data = AdminData {
            classrooms: or_empty(classrooms, DataKind::Classrooms),
            teachers: or_empty(teachers, DataKind::Teachers),
            students: or_empty(students, DataKind::Students),
            pricing_rates: usable_pricing(or_empty(pricing_rates, DataKind::Pricing)),
            payments: or_empty(payments, DataKind::Payments),
            ..AdminData::default()
        };

        info!(
            classrooms = data.classrooms.len(),
            teachers = data.teachers.len(),
            students = data.students.len(),
            pricing_rates = data.pricing_rates.len(),
            payments = data.payments.len(),
            force,
            "Admin data loaded"
        );

        self.publish(move |current| *current = data, true).await
    }

    /// Re-fetches one table and replaces it in the snapshot.
    ///
    /// Unlike a full load, a failed fetch is returned to the caller and
    /// the snapshot is left unchanged. Waits for any full load in flight,
    /// so a load that fetched before a write cannot publish over it.
    pub async fn refresh(&self, kind: DataKind) -> EngineResult<Arc<AdminData>> {
        let _guard = self.load_lock.lock().await;
        let apply: Box<dyn FnOnce(&mut AdminData) + Send> = match kind {
            DataKind::Classrooms => {
                let rows = self.source.fetch_classrooms().await?;
                Box::new(move |data| data.classrooms = rows)
            }
            DataKind::Teachers => {
                let rows = self.source.fetch_teachers().await?;
                Box::new(move |data| data.teachers = rows)
            }
            DataKind::Students => {
                let rows = self.source.fetch_students().await?;
                Box::new(move |data| data.students = rows)
            }
            DataKind::Pricing => {
                let rows = usable_pricing(self.source.fetch_pricing_rates().await?);
                Box::new(move |data| data.pricing_rates = rows)
            }
            DataKind::Payments => {
                let rows = self.source.fetch_payments().await?;
                Box::new(move |data| data.payments = rows)
            }
        };

        info!(kind = %kind, "Admin data refreshed");
        Ok(self.publish(apply, false).await)
    }

    /// Applies a change to a copy of the snapshot and swaps it in.
    ///
    /// The copy is taken under the write lock so concurrent refreshes of
    /// different tables do not drop each other's rows.
    async fn publish(
        &self,
        apply: impl FnOnce(&mut AdminData),
        mark_loaded: bool,
    ) -> Arc<AdminData> {
        let mut state = self.state.write().await;
        let mut data = (*state.data).clone();
        apply(&mut data);
        data.stats = compute_stats(
            &data.classrooms,
            &data.teachers,
            &data.students,
            &data.payments,
        );

        let data = Arc::new(data);
        state.data = Arc::clone(&data);
        state.loaded |= mark_loaded;
        data
    }

    /// Computes every teacher's salary from the loaded data.
    pub async fn salary_report(&self) -> Vec<TeacherSalary> {
        let data = self.load_all(false).await;
        let pricing = PricingTable::from_rates(&data.pricing_rates);
        build_salary_report(
            &data.teachers,
            &data.classrooms,
            &data.students,
            &pricing,
            self.config.policy(),
        )
    }

    /// Computes one teacher's salary from the loaded data.
    pub async fn teacher_salary(&self, teacher_id: &str) -> EngineResult<TeacherSalary> {
        let data = self.load_all(false).await;
        let teacher = data
            .teachers
            .iter()
            .find(|t| t.id == teacher_id)
            .ok_or_else(|| EngineError::TeacherNotFound {
                id: teacher_id.to_string(),
            })?;

        let pricing = PricingTable::from_rates(&data.pricing_rates);
        Ok(TeacherSalary {
            teacher_id: teacher.id.clone(),
            name: teacher.display_name(),
            email: teacher.email().to_string(),
            breakdown: calculate_teacher_salary(
                &teacher.id,
                &data.classrooms,
                &data.students,
                &pricing,
                self.config.policy(),
            ),
        })
    }

    /// Adds a pricing entry after validating it and checking its key is free.
    pub async fn create_pricing(&self, rate: PricingRate) -> EngineResult<PricingRate> {
        self.config.validate_pricing(&rate)?;

        let data = self.load_all(false).await;
        let key = rate.key();
        if data.pricing_rates.iter().any(|r| r.key() == key) {
            return Err(EngineError::DuplicatePricing {
                key: key.to_string(),
            });
        }

        let stored = self.source.insert_pricing_rate(&rate).await?;
        info!(pricing_id = %stored.id, pricing_key = %key, "Pricing created");
        self.refresh(DataKind::Pricing).await?;
        Ok(stored)
    }

    /// Changes the fee and duration of a pricing entry.
    pub async fn update_pricing(&self, id: &str, update: PricingUpdate) -> EngineResult<()> {
        update.validate()?;
        self.source.update_pricing_rate(id, &update).await?;
        info!(pricing_id = %id, "Pricing updated");
        self.refresh(DataKind::Pricing).await?;
        Ok(())
    }

    /// Removes a pricing entry.
    pub async fn delete_pricing(&self, id: &str) -> EngineResult<()> {
        self.source.delete_pricing_rate(id).await?;
        info!(pricing_id = %id, "Pricing deleted");
        self.refresh(DataKind::Pricing).await?;
        Ok(())
    }

    /// Approves a pending payment and records its access expiry.
    pub async fn approve_payment(
        &self,
        id: &str,
        expire_at: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> EngineResult<PaymentUpdate> {
        let data = self.load_all(false).await;
        let payment = data
            .payments
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::PaymentNotFound { id: id.to_string() })?;

        let update = approve_payment(payment, expire_at, now)?;
        self.source.update_payment(id, &update).await?;
        info!(payment_id = %id, expire_at = ?update.expire_at, "Payment approved");
        self.refresh(DataKind::Payments).await?;
        Ok(update)
    }

    /// Declines a pending payment with a reason.
    pub async fn decline_payment(
        &self,
        id: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<PaymentUpdate> {
        let data = self.load_all(false).await;
        let payment = data
            .payments
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::PaymentNotFound { id: id.to_string() })?;

        let update = decline_payment(payment, reason, now)?;
        self.source.update_payment(id, &update).await?;
        info!(payment_id = %id, "Payment declined");
        self.refresh(DataKind::Payments).await?;
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Catalog, SalaryPolicy};
    use crate::models::{
        Classroom, Payment, PaymentStatus, RecordStatus, StudentEnrollment, Teacher,
    };
    use crate::store::InMemorySource;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    fn config() -> Arc<ConfigLoader> {
        let catalog = Catalog {
            boards: vec!["CBSE".to_string(), "ICSE".to_string()],
            grade_levels: (1..=12).collect(),
            subjects: vec![],
            payment_plans: vec![],
        };
        Arc::new(ConfigLoader::from_parts(SalaryPolicy::default(), catalog, vec![]).unwrap())
    }

    fn rate(id: &str, grade: u32, board: &str, fee: i64) -> PricingRate {
        PricingRate {
            id: id.to_string(),
            grade_level: grade,
            board: board.to_string(),
            subject: "All".to_string(),
            fee_per_month: Decimal::new(fee, 0),
            duration_per_month: Decimal::new(8, 0),
            fee_per_hour: None,
            is_active: true,
        }
    }

    fn seeded() -> AdminData {
        AdminData {
            classrooms: vec![Classroom {
                id: "c1".to_string(),
                name: "Grade 8 Physics".to_string(),
                teacher_id: Some("t1".to_string()),
                grade_level: Some(8),
                board: Some("CBSE".to_string()),
                subject: Some("Physics".to_string()),
                is_active: true,
            }],
            teachers: vec![Teacher {
                id: "t1".to_string(),
                user_id: None,
                status: RecordStatus::Active,
                users: None,
            }],
            students: (0..3)
                .map(|i| StudentEnrollment {
                    student_id: format!("s{}", i),
                    classroom_id: Some("c1".to_string()),
                    status: RecordStatus::Active,
                })
                .collect(),
            pricing_rates: vec![rate("p1", 8, "CBSE", 1400)],
            payments: vec![Payment {
                id: "pay_1".to_string(),
                student_id: "s0".to_string(),
                student_name: "Ravi".to_string(),
                student_email: "ravi@example.com".to_string(),
                classroom_id: Some("c1".to_string()),
                classroom_name: "Grade 8 Physics".to_string(),
                amount: Decimal::new(1400, 0),
                payment_method: None,
                transaction_id: None,
                screenshot_url: None,
                time_period_months: 3,
                status: PaymentStatus::Pending,
                expire_at: None,
                remarks: None,
                created_at: None,
            }],
            ..AdminData::default()
        }
    }

    fn store(data: AdminData) -> AdminStore {
        AdminStore::new(Arc::new(InMemorySource::new(data)), config())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap()
    }

    /// Counts fetches and fails the teachers table.
    struct FlakySource {
        inner: InMemorySource,
        classroom_fetches: AtomicUsize,
    }

    #[async_trait]
    impl AdminDataSource for FlakySource {
        async fn fetch_classrooms(&self) -> EngineResult<Vec<Classroom>> {
            self.classroom_fetches.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch_classrooms().await
        }
        async fn fetch_teachers(&self) -> EngineResult<Vec<Teacher>> {
            Err(EngineError::DataSource {
                table: "teachers".to_string(),
                message: "HTTP 500".to_string(),
            })
        }
        async fn fetch_students(&self) -> EngineResult<Vec<StudentEnrollment>> {
            self.inner.fetch_students().await
        }
        async fn fetch_pricing_rates(&self) -> EngineResult<Vec<PricingRate>> {
            self.inner.fetch_pricing_rates().await
        }
        async fn fetch_payments(&self) -> EngineResult<Vec<Payment>> {
            self.inner.fetch_payments().await
        }
        async fn insert_pricing_rate(&self, rate: &PricingRate) -> EngineResult<PricingRate> {
            self.inner.insert_pricing_rate(rate).await
        }
        async fn update_pricing_rate(&self, id: &str, update: &PricingUpdate) -> EngineResult<()> {
            self.inner.update_pricing_rate(id, update).await
        }
        async fn delete_pricing_rate(&self, id: &str) -> EngineResult<()> {
            self.inner.delete_pricing_rate(id).await
        }
        async fn update_payment(&self, id: &str, update: &PaymentUpdate) -> EngineResult<()> {
            self.inner.update_payment(id, update).await
        }
    }

    fn flaky() -> Arc<FlakySource> {
        Arc::new(FlakySource {
            inner: InMemorySource::new(seeded()),
            classroom_fetches: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_new_store_is_empty_and_unloaded() {
        let store = store(seeded());
        assert!(!store.is_loaded().await);
        assert!(store.snapshot().await.classrooms.is_empty());
    }

    #[tokio::test]
    async fn test_load_all_populates_tables_and_stats() {
        let store = store(seeded());
        let data = store.load_all(false).await;

        assert!(store.is_loaded().await);
        assert_eq!(data.classrooms.len(), 1);
        assert_eq!(data.stats.total_classrooms, 1);
        assert_eq!(data.stats.total_students, 3);
        assert_eq!(data.stats.pending_payments, 1);
    }

    #[tokio::test]
    async fn test_load_all_skips_when_loaded_unless_forced() {
        let source = flaky();
        let store = AdminStore::new(source.clone(), config());

        store.load_all(false).await;
        store.load_all(false).await;
        assert_eq!(source.classroom_fetches.load(Ordering::SeqCst), 1);

        store.load_all(true).await;
        assert_eq!(source.classroom_fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_table_degrades_to_empty() {
        let store = AdminStore::new(flaky(), config());
        let data = store.load_all(false).await;

        assert!(data.teachers.is_empty());
        assert_eq!(data.classrooms.len(), 1);
        assert!(store.is_loaded().await);
    }

    #[tokio::test]
    async fn test_refresh_propagates_fetch_error() {
        let store = AdminStore::new(flaky(), config());
        store.load_all(false).await;

        let result = store.refresh(DataKind::Teachers).await;
        assert!(matches!(result, Err(EngineError::DataSource { .. })));
    }

    #[tokio::test]
    async fn test_teacher_salary_from_store() {
        let store = store(seeded());
        let salary = store.teacher_salary("t1").await.unwrap();

        assert_eq!(salary.breakdown.total_monthly, Decimal::new(2100, 0));
        assert_eq!(salary.breakdown.total_annual, Decimal::new(25200, 0));
    }

    #[tokio::test]
    async fn test_unknown_teacher_is_not_found() {
        let store = store(seeded());
        assert!(matches!(
            store.teacher_salary("t404").await,
            Err(EngineError::TeacherNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_pricing_rejects_duplicate_key() {
        let store = store(seeded());
        let result = store.create_pricing(rate("p2", 8, "CBSE", 1500)).await;

        match result {
            Err(EngineError::DuplicatePricing { key }) => assert_eq!(key, "8_CBSE"),
            other => panic!("Expected DuplicatePricing, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_pricing_refreshes_snapshot() {
        let store = store(seeded());
        store.create_pricing(rate("p2", 5, "ICSE", 1000)).await.unwrap();

        let data = store.snapshot().await;
        assert_eq!(data.pricing_rates.len(), 2);
    }

    #[tokio::test]
    async fn test_pricing_update_changes_salary() {
        let store = store(seeded());
        store
            .update_pricing(
                "p1",
                PricingUpdate {
                    fee_per_month: Decimal::new(2000, 0),
                    duration_per_month: Decimal::new(8, 0),
                    fee_per_hour: None,
                },
            )
            .await
            .unwrap();

        let salary = store.teacher_salary("t1").await.unwrap();
        assert_eq!(salary.breakdown.total_monthly, Decimal::new(3000, 0));
    }

    #[tokio::test]
    async fn test_deleting_pricing_leaves_classroom_unpriced() {
        let store = store(seeded());
        store.delete_pricing("p1").await.unwrap();

        let salary = store.teacher_salary("t1").await.unwrap();
        assert_eq!(salary.breakdown.total_monthly, Decimal::ZERO);
        assert_eq!(salary.breakdown.unpriced.len(), 1);
    }

    #[tokio::test]
    async fn test_approve_payment_updates_snapshot() {
        let store = store(seeded());
        let update = store.approve_payment("pay_1", None, now()).await.unwrap();

        assert_eq!(update.expire_at, NaiveDate::from_ymd_opt(2026, 4, 15));
        let data = store.snapshot().await;
        assert_eq!(data.payments[0].status, PaymentStatus::Completed);
        assert_eq!(data.stats.pending_payments, 0);
    }

    #[tokio::test]
    async fn test_decline_then_approve_is_rejected() {
        let store = store(seeded());
        store
            .decline_payment("pay_1", "Wrong amount", now())
            .await
            .unwrap();

        let result = store.approve_payment("pay_1", None, now()).await;
        assert!(matches!(
            result,
            Err(EngineError::InvalidPaymentTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_pricing_rows_are_skipped() {
        let mut data = seeded();
        data.pricing_rates[0].fee_per_month = Decimal::MAX;
        let store = store(data);

        let salary = store.teacher_salary("t1").await.unwrap();
        assert!(store.snapshot().await.pricing_rates.is_empty());
        assert_eq!(salary.breakdown.total_monthly, Decimal::ZERO);
        assert_eq!(salary.breakdown.unpriced.len(), 1);
    }

    /// Holds the first pricing fetch until released, then returns what it read.
    struct GatedSource {
        inner: InMemorySource,
        pricing_fetches: AtomicUsize,
        gate: Notify,
    }

    #[async_trait]
    impl AdminDataSource for GatedSource {
        async fn fetch_classrooms(&self) -> EngineResult<Vec<Classroom>> {
            self.inner.fetch_classrooms().await
        }
        async fn fetch_teachers(&self) -> EngineResult<Vec<Teacher>> {
            self.inner.fetch_teachers().await
        }
        async fn fetch_students(&self) -> EngineResult<Vec<StudentEnrollment>> {
            self.inner.fetch_students().await
        }
        async fn fetch_pricing_rates(&self) -> EngineResult<Vec<PricingRate>> {
            let rows = self.inner.fetch_pricing_rates().await?;
            if self.pricing_fetches.fetch_add(1, Ordering::SeqCst) == 0 {
                self.gate.notified().await;
            }
            Ok(rows)
        }
        async fn fetch_payments(&self) -> EngineResult<Vec<Payment>> {
            self.inner.fetch_payments().await
        }
        async fn insert_pricing_rate(&self, rate: &PricingRate) -> EngineResult<PricingRate> {
            self.inner.insert_pricing_rate(rate).await
        }
        async fn update_pricing_rate(&self, id: &str, update: &PricingUpdate) -> EngineResult<()> {
            self.inner.update_pricing_rate(id, update).await
        }
        async fn delete_pricing_rate(&self, id: &str) -> EngineResult<()> {
            self.inner.delete_pricing_rate(id).await
        }
        async fn update_payment(&self, id: &str, update: &PaymentUpdate) -> EngineResult<()> {
            self.inner.update_payment(id, update).await
        }
    }

    #[tokio::test]
    async fn test_refresh_after_write_is_not_overwritten_by_slow_load() {
        let source = Arc::new(GatedSource {
            inner: InMemorySource::new(seeded()),
            pricing_fetches: AtomicUsize::new(0),
            gate: Notify::new(),
        });
        let store = Arc::new(AdminStore::new(source.clone(), config()));

        let load = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.load_all(true).await }
        });
        while source.pricing_fetches.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        // The load has read the old fee; write the new one and refresh
        source
            .inner
            .update_pricing_rate(
                "p1",
                &PricingUpdate {
                    fee_per_month: Decimal::new(2000, 0),
                    duration_per_month: Decimal::new(8, 0),
                    fee_per_hour: None,
                },
            )
            .await
            .unwrap();
        let refresh = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.refresh(DataKind::Pricing).await }
        });
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        source.gate.notify_one();
        load.await.unwrap();
        refresh.await.unwrap().unwrap();

        let data = store.snapshot().await;
        assert_eq!(data.pricing_rates[0].fee_per_month, Decimal::new(2000, 0));
    }
}
