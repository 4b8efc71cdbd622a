use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::expense::FixedExpense;
use crate::models::record::DailyRecord;

use super::format;
use super::kv::KeyValueStore;

/// The storage keys under which the two collections live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub daily_records: String,
    pub fixed_expenses: String,
}

impl Default for Namespace {
    fn default() -> Self {
        Self {
            daily_records: "stall_daily_records".to_string(),
            fixed_expenses: "stall_fixed_expenses".to_string(),
        }
    }
}

/// The two persisted collections — daily records and fixed expenses — over
/// an injected key-value backend.
///
/// Every mutation is read-modify-write through the backend, so the stored
/// blobs are always current. The store persists records exactly as given;
/// it never normalizes — callers normalize before writing.
pub struct RecordStore {
    kv: Box<dyn KeyValueStore>,
    namespace: Namespace,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl RecordStore {
    pub fn new(kv: Box<dyn KeyValueStore>) -> Self {
        Self::with_namespace(kv, Namespace::default())
    }

    pub fn with_namespace(kv: Box<dyn KeyValueStore>, namespace: Namespace) -> Self {
        Self { kv, namespace }
    }

    // ── Daily records ───────────────────────────────────────────────

    /// Read the daily-record collection, propagating storage/decode errors.
    pub fn try_list_daily(&self) -> Result<Vec<DailyRecord>, CoreError> {
        match self.kv.get(&self.namespace.daily_records)? {
            Some(raw) => format::decode_collection(&raw),
            None => Ok(Vec::new()),
        }
    }

    /// Read the daily-record collection, degrading to empty on a bad blob.
    ///
    /// A corrupt or unreadable collection must never lock the operator out
    /// of the books; use `try_list_daily` to distinguish corruption from an
    /// actually empty ledger.
    #[must_use]
    pub fn list_daily(&self) -> Vec<DailyRecord> {
        self.try_list_daily().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "daily records unreadable, treating as empty");
            Vec::new()
        })
    }

    /// Insert or replace the record for its date.
    ///
    /// At most one record exists per date. When the date is already present
    /// the stored record is replaced wholesale with the incoming one (the
    /// incoming `id` wins — the previous record's id is discarded) and
    /// `updated_at` is refreshed. Otherwise the record is appended as given.
    /// Returns the record as persisted.
    pub fn upsert_daily(&mut self, record: DailyRecord) -> Result<DailyRecord, CoreError> {
        let mut records = self.list_daily();

        let stored = match records.iter().position(|r| r.date == record.date) {
            Some(idx) => {
                let replacement = DailyRecord {
                    updated_at: Utc::now(),
                    ..record
                };
                records[idx] = replacement.clone();
                replacement
            }
            None => {
                records.push(record.clone());
                record
            }
        };

        self.write_daily(&records)?;
        Ok(stored)
    }

    /// Look up the record for a date, if one exists.
    #[must_use]
    pub fn get_daily_by_date(&self, date: NaiveDate) -> Option<DailyRecord> {
        self.list_daily().into_iter().find(|r| r.date == date)
    }

    /// Remove a record by id. A no-op if no record has that id.
    pub fn delete_daily(&mut self, id: Uuid) -> Result<(), CoreError> {
        let mut records = self.list_daily();
        records.retain(|r| r.id != id);
        self.write_daily(&records)
    }

    fn write_daily(&mut self, records: &[DailyRecord]) -> Result<(), CoreError> {
        let raw = format::encode_collection(records)?;
        self.kv.set(&self.namespace.daily_records, &raw)?;
        tracing::debug!(count = records.len(), "daily records written");
        Ok(())
    }

    // ── Fixed expenses ──────────────────────────────────────────────

    /// Read the fixed-expense collection, propagating storage/decode errors.
    pub fn try_list_fixed(&self) -> Result<Vec<FixedExpense>, CoreError> {
        match self.kv.get(&self.namespace.fixed_expenses)? {
            Some(raw) => format::decode_collection(&raw),
            None => Ok(Vec::new()),
        }
    }

    /// Read the fixed-expense collection, degrading to empty on a bad blob.
    #[must_use]
    pub fn list_fixed(&self) -> Vec<FixedExpense> {
        self.try_list_fixed().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "fixed expenses unreadable, treating as empty");
            Vec::new()
        })
    }

    /// Insert or replace a fixed expense by id. Fixed expenses may share a
    /// date; only the id is unique.
    pub fn upsert_fixed(&mut self, expense: FixedExpense) -> Result<(), CoreError> {
        let mut expenses = self.list_fixed();
        match expenses.iter().position(|e| e.id == expense.id) {
            Some(idx) => expenses[idx] = expense,
            None => expenses.push(expense),
        }
        self.write_fixed(&expenses)
    }

    /// Remove a fixed expense by id. A no-op if absent.
    pub fn delete_fixed(&mut self, id: Uuid) -> Result<(), CoreError> {
        let mut expenses = self.list_fixed();
        expenses.retain(|e| e.id != id);
        self.write_fixed(&expenses)
    }

    fn write_fixed(&mut self, expenses: &[FixedExpense]) -> Result<(), CoreError> {
        let raw = format::encode_collection(expenses)?;
        self.kv.set(&self.namespace.fixed_expenses, &raw)?;
        tracing::debug!(count = expenses.len(), "fixed expenses written");
        Ok(())
    }
}
