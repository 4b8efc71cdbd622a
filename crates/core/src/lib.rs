pub mod errors;
pub mod format;
pub mod models;
pub mod sample;
pub mod services;
pub mod storage;

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use models::{
    chart::DayPoint,
    expense::{ExpenseCategory, FixedExpense},
    metrics::{BusinessMetrics, ExpenseSlice},
    record::{DailyRecord, RecordSortOrder, SelfReview},
};
use services::{
    chart_service::ChartService, metrics_service::MetricsService,
    record_service::RecordService,
};
use storage::kv::{KeyValueStore, MemoryStore};
use storage::store::{Namespace, RecordStore};

use errors::CoreError;

/// Chart window used by the dashboard view.
const DASHBOARD_WINDOW_WEEKS: u32 = 4;

/// Main entry point for the Stall Ledger core library.
/// Owns the record store and all services needed to operate on it.
#[must_use]
pub struct StallLedger {
    store: RecordStore,
    record_service: RecordService,
    metrics_service: MetricsService,
    chart_service: ChartService,
}

impl std::fmt::Debug for StallLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StallLedger")
            .field("daily_records", &self.store.list_daily().len())
            .field("fixed_expenses", &self.store.list_fixed().len())
            .finish()
    }
}

impl StallLedger {
    /// A ledger over a volatile in-memory backend (fresh books every run).
    pub fn in_memory() -> Self {
        Self::with_store(Box::new(MemoryStore::new()))
    }

    /// A ledger over any injected key-value backend.
    pub fn with_store(kv: Box<dyn KeyValueStore>) -> Self {
        Self::build(RecordStore::new(kv))
    }

    /// A ledger over an injected backend with custom storage keys.
    pub fn with_store_and_namespace(kv: Box<dyn KeyValueStore>, namespace: Namespace) -> Self {
        Self::build(RecordStore::with_namespace(kv, namespace))
    }

    /// Open a file-backed ledger rooted at `dir` (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(dir: &str) -> Result<Self, CoreError> {
        let kv = storage::kv::FileStore::new(dir)?;
        Ok(Self::with_store(Box::new(kv)))
    }

    // ── Daily Records ───────────────────────────────────────────────

    /// A fresh, zeroed record template for `date` with default sale prices.
    pub fn new_daily(&self, date: NaiveDate) -> DailyRecord {
        DailyRecord::empty(date)
    }

    /// Look up the record for a date.
    #[must_use]
    pub fn get_daily(&self, date: NaiveDate) -> Option<DailyRecord> {
        self.store.get_daily_by_date(date)
    }

    /// The record for a date, or a fresh template if none exists yet.
    /// An absent date is not an error — it just means the day hasn't been
    /// logged.
    #[must_use]
    pub fn get_or_new_daily(&self, date: NaiveDate) -> DailyRecord {
        self.store
            .get_daily_by_date(date)
            .unwrap_or_else(|| DailyRecord::empty(date))
    }

    /// Validate, normalize, and persist a daily record.
    ///
    /// The record replaces any previously stored record for the same date.
    /// Returns the record as persisted, derived fields recomputed.
    pub fn save_daily(&mut self, record: DailyRecord) -> Result<DailyRecord, CoreError> {
        self.record_service.validate(&record)?;
        let normalized = self.record_service.normalize(record);
        self.store.upsert_daily(normalized)
    }

    /// Replace the self review on an already-logged date.
    pub fn update_self_review(
        &mut self,
        date: NaiveDate,
        review: SelfReview,
    ) -> Result<DailyRecord, CoreError> {
        let mut record = self
            .store
            .get_daily_by_date(date)
            .ok_or_else(|| CoreError::RecordNotFound(date.to_string()))?;
        record.self_review = review;
        self.save_daily(record)
    }

    /// Remove a record by its id. A no-op if no record has that id.
    pub fn delete_daily(&mut self, id: Uuid) -> Result<(), CoreError> {
        self.store.delete_daily(id)
    }

    /// All daily records in stored order.
    #[must_use]
    pub fn list_daily(&self) -> Vec<DailyRecord> {
        self.store.list_daily()
    }

    /// All daily records, surfacing storage corruption instead of degrading.
    pub fn try_list_daily(&self) -> Result<Vec<DailyRecord>, CoreError> {
        self.store.try_list_daily()
    }

    /// Daily records sorted by a specific order.
    #[must_use]
    pub fn list_daily_sorted(&self, order: &RecordSortOrder) -> Vec<DailyRecord> {
        let mut records = self.store.list_daily();
        match order {
            RecordSortOrder::DateDesc => records.sort_by(|a, b| b.date.cmp(&a.date)),
            RecordSortOrder::DateAsc => records.sort_by(|a, b| a.date.cmp(&b.date)),
            RecordSortOrder::ProfitDesc => records.sort_by(|a, b| {
                b.gross_profit
                    .partial_cmp(&a.gross_profit)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            RecordSortOrder::ProfitAsc => records.sort_by(|a, b| {
                a.gross_profit
                    .partial_cmp(&b.gross_profit)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            RecordSortOrder::RevenueDesc => records.sort_by(|a, b| {
                b.total_revenue
                    .partial_cmp(&a.total_revenue)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            RecordSortOrder::RevenueAsc => records.sort_by(|a, b| {
                a.total_revenue
                    .partial_cmp(&b.total_revenue)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }
        records
    }

    /// Records within a date range (inclusive on both ends), oldest first.
    #[must_use]
    pub fn records_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<DailyRecord> {
        let mut records: Vec<DailyRecord> = self
            .store
            .list_daily()
            .into_iter()
            .filter(|r| r.date >= from && r.date <= to)
            .collect();
        records.sort_by_key(|r| r.date);
        records
    }

    /// The latest `limit` records, newest first. The dashboard's
    /// recent-days panel.
    #[must_use]
    pub fn recent_daily(&self, limit: usize) -> Vec<DailyRecord> {
        let mut records = self.list_daily_sorted(&RecordSortOrder::DateDesc);
        records.truncate(limit);
        records
    }

    /// Search records by matching query against purchase materials, juice
    /// kinds, consumable labels, and review text (case-insensitive).
    #[must_use]
    pub fn search_daily(&self, query: &str) -> Vec<DailyRecord> {
        let q = query.to_lowercase();
        self.store
            .list_daily()
            .into_iter()
            .filter(|r| {
                r.raw_purchases
                    .iter()
                    .any(|p| p.material.to_lowercase().contains(&q))
                    || r.produced_liquid
                        .iter()
                        .any(|j| j.kind.to_lowercase().contains(&q))
                    || r.consumable_expenses
                        .iter()
                        .any(|e| e.label.to_lowercase().contains(&q))
                    || r.self_review.notes.to_lowercase().contains(&q)
                    || r.self_review.challenges.to_lowercase().contains(&q)
                    || r.self_review.improvements.to_lowercase().contains(&q)
            })
            .collect()
    }

    /// Number of days logged.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.store.list_daily().len()
    }

    /// Date of the first logged day.
    #[must_use]
    pub fn earliest_record_date(&self) -> Option<NaiveDate> {
        self.store.list_daily().iter().map(|r| r.date).min()
    }

    /// Date of the most recently logged day.
    #[must_use]
    pub fn latest_record_date(&self) -> Option<NaiveDate> {
        self.store.list_daily().iter().map(|r| r.date).max()
    }

    // ── Fixed Expenses ──────────────────────────────────────────────

    /// Record a one-time capital/setup cost. Returns the stored expense.
    pub fn add_fixed_expense(
        &mut self,
        name: impl Into<String>,
        amount: f64,
        category: ExpenseCategory,
        date: NaiveDate,
        notes: Option<String>,
    ) -> Result<FixedExpense, CoreError> {
        let mut expense = FixedExpense::new(name, amount, category, date);
        expense.notes = notes;
        self.record_service.validate_fixed(&expense)?;
        self.store.upsert_fixed(expense.clone())?;
        Ok(expense)
    }

    /// Insert or replace a fixed expense by id.
    pub fn save_fixed_expense(&mut self, expense: FixedExpense) -> Result<(), CoreError> {
        self.record_service.validate_fixed(&expense)?;
        self.store.upsert_fixed(expense)
    }

    /// Remove a fixed expense by id. A no-op if absent.
    pub fn delete_fixed_expense(&mut self, id: Uuid) -> Result<(), CoreError> {
        self.store.delete_fixed(id)
    }

    /// All fixed expenses in stored order.
    #[must_use]
    pub fn list_fixed(&self) -> Vec<FixedExpense> {
        self.store.list_fixed()
    }

    /// All fixed expenses, surfacing storage corruption instead of degrading.
    pub fn try_list_fixed(&self) -> Result<Vec<FixedExpense>, CoreError> {
        self.store.try_list_fixed()
    }

    /// Total one-time investment to date.
    #[must_use]
    pub fn total_fixed_expenses(&self) -> f64 {
        self.store.list_fixed().iter().map(|e| e.amount).sum()
    }

    // ── Views ───────────────────────────────────────────────────────

    /// Business-wide statistics over the full history.
    #[must_use]
    pub fn metrics(&self) -> BusinessMetrics {
        self.metrics_service
            .aggregate(&self.store.list_daily(), &self.store.list_fixed())
    }

    /// Chart series for the trailing `weeks` weeks, ending today.
    #[must_use]
    pub fn weekly_series(&self, weeks: u32) -> Vec<DayPoint> {
        let today = Utc::now().date_naive();
        self.chart_service
            .project(&self.store.list_daily(), weeks, today)
    }

    /// The dashboard's default chart series (trailing four weeks).
    #[must_use]
    pub fn dashboard_series(&self) -> Vec<DayPoint> {
        self.weekly_series(DASHBOARD_WINDOW_WEEKS)
    }

    /// Where the daily money went, totaled over the whole history.
    #[must_use]
    pub fn expense_breakdown(&self) -> Vec<ExpenseSlice> {
        self.metrics_service
            .expense_breakdown(&self.store.list_daily())
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export all daily records as a JSON string.
    pub fn export_daily_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.store.list_daily())
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize records: {e}")))
    }

    /// Export a per-day summary as a CSV string.
    /// Columns: date, revenue, expenses, profit, margin_pct, units_sold,
    /// cash, digital, mood, rating
    #[must_use]
    pub fn export_daily_to_csv(&self) -> String {
        let mut csv = String::from(
            "date,revenue,expenses,profit,margin_pct,units_sold,cash,digital,mood,rating\n",
        );
        for record in self.list_daily_sorted(&RecordSortOrder::DateAsc) {
            csv.push_str(&format!(
                "{},{},{},{},{:.2},{},{},{},{},{}\n",
                record.date,
                record.total_revenue,
                record.total_expenses,
                record.gross_profit,
                record.profit_margin_pct,
                record.unit_sales.units_sold(),
                record.cash_amount,
                record.digital_amount,
                record.self_review.mood,
                record.self_review.rating,
            ));
        }
        csv
    }

    /// Import daily records from a JSON string. All records are validated
    /// first; if any fails, none are imported. Each surviving record is
    /// normalized and upserted by date. Returns the number imported.
    pub fn import_daily_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let records: Vec<DailyRecord> = serde_json::from_str(json)?;
        for record in &records {
            self.record_service.validate(record)?;
        }
        let count = records.len();
        for record in records {
            self.save_daily(record)?;
        }
        Ok(count)
    }

    // ── Demo Data ───────────────────────────────────────────────────

    /// Fill the ledger with a trailing month of demo records plus the
    /// starter fixed expenses. Returns the number of daily records seeded.
    pub fn seed_sample_data(&mut self) -> Result<usize, CoreError> {
        let today = Utc::now().date_naive();
        let records = sample::sample_daily_records(today, sample::DEFAULT_SEED);
        let count = records.len();
        for record in records {
            self.store.upsert_daily(record)?;
        }
        for expense in sample::sample_fixed_expenses(today - Duration::days(30)) {
            self.store.upsert_fixed(expense)?;
        }
        Ok(count)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(store: RecordStore) -> Self {
        Self {
            store,
            record_service: RecordService::new(),
            metrics_service: MetricsService::new(),
            chart_service: ChartService::new(),
        }
    }
}
