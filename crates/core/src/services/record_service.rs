use chrono::Utc;

use crate::errors::CoreError;
use crate::models::expense::FixedExpense;
use crate::models::record::DailyRecord;

/// Validates raw input and recomputes the derived fields of a daily record.
///
/// Pure business logic — no I/O. The store never normalizes on its own;
/// callers run `validate` + `normalize` before every persisted write.
pub struct RecordService;

impl RecordService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a daily record before it is persisted.
    ///
    /// Rules:
    /// - Every purchase line needs a non-empty material and positive
    ///   quantity and price
    /// - Every juice batch needs a non-empty kind and positive liters
    /// - Every consumable expense needs a non-empty label and positive amount
    /// - The self-review rating must be between 1 and 5
    ///
    /// A negative used weight (wastage exceeding purchases) is NOT rejected.
    pub fn validate(&self, record: &DailyRecord) -> Result<(), CoreError> {
        for purchase in &record.raw_purchases {
            if purchase.material.trim().is_empty() {
                return Err(CoreError::ValidationError(
                    "Purchase line is missing a material name".into(),
                ));
            }
            if purchase.quantity_kg <= 0.0 || purchase.unit_price <= 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Purchase line '{}' needs a positive quantity and price",
                    purchase.material
                )));
            }
        }

        for batch in &record.produced_liquid {
            if batch.kind.trim().is_empty() {
                return Err(CoreError::ValidationError(
                    "Juice batch is missing a type".into(),
                ));
            }
            if batch.liters <= 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Juice batch '{}' needs a positive volume",
                    batch.kind
                )));
            }
        }

        for expense in &record.consumable_expenses {
            if expense.label.trim().is_empty() {
                return Err(CoreError::ValidationError(
                    "Consumable expense is missing a label".into(),
                ));
            }
            if expense.amount <= 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Consumable expense '{}' needs a positive amount",
                    expense.label
                )));
            }
        }

        if !(1..=5).contains(&record.self_review.rating) {
            return Err(CoreError::ValidationError(format!(
                "Self-review rating {} is out of range (1-5)",
                record.self_review.rating
            )));
        }

        Ok(())
    }

    /// Validate a fixed expense before it is persisted.
    pub fn validate_fixed(&self, expense: &FixedExpense) -> Result<(), CoreError> {
        if expense.name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Fixed expense is missing a name".into(),
            ));
        }
        if expense.amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Fixed expense '{}' needs a positive amount",
                expense.name
            )));
        }
        Ok(())
    }

    /// Recompute every derived field from the raw input fields and stamp
    /// `updated_at`.
    ///
    /// Idempotent apart from the timestamp: normalizing an already-normalized
    /// record changes nothing else.
    #[must_use]
    pub fn normalize(&self, record: DailyRecord) -> DailyRecord {
        let raw_material_cost: f64 = record.raw_purchases.iter().map(|p| p.line_cost).sum();
        let consumable_total: f64 = record.consumable_expenses.iter().map(|e| e.amount).sum();
        let total_expenses = raw_material_cost + consumable_total;

        let total_revenue = record.unit_sales.revenue();
        let total_collected = record.cash_amount + record.digital_amount;
        let gross_profit = total_revenue - total_expenses;
        let profit_margin_pct = if total_revenue > 0.0 {
            (gross_profit / total_revenue) * 100.0
        } else {
            0.0
        };

        let total_raw_weight_kg: f64 = record.raw_purchases.iter().map(|p| p.quantity_kg).sum();
        let used_weight_kg = total_raw_weight_kg - record.wastage_weight_kg;

        DailyRecord {
            total_raw_weight_kg,
            used_weight_kg,
            total_revenue,
            total_expenses,
            total_collected,
            gross_profit,
            profit_margin_pct,
            updated_at: Utc::now(),
            ..record
        }
    }
}

impl Default for RecordService {
    fn default() -> Self {
        Self::new()
    }
}
