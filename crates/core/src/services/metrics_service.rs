use crate::models::expense::FixedExpense;
use crate::models::metrics::{BusinessMetrics, DayStamp, ExpenseSlice};
use crate::models::record::DailyRecord;

/// Computes business-wide statistics from the daily-record history.
///
/// Pure aggregation — no I/O, no mutation. Easy to test.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate the full history into a `BusinessMetrics` snapshot.
    ///
    /// An empty history is a defined case, not an error: all totals are zero
    /// and `best_day`/`worst_day` are `None`. Fixed expenses count toward
    /// `total_expenses` (and thus profit) but do not affect any per-day
    /// figure.
    #[must_use]
    pub fn aggregate(
        &self,
        records: &[DailyRecord],
        fixed_expenses: &[FixedExpense],
    ) -> BusinessMetrics {
        if records.is_empty() {
            return BusinessMetrics::zero();
        }

        let count = records.len() as f64;

        let total_fixed: f64 = fixed_expenses.iter().map(|e| e.amount).sum();
        let total_revenue: f64 = records.iter().map(|r| r.total_revenue).sum();
        let total_daily_expenses: f64 = records.iter().map(|r| r.total_expenses).sum();
        let total_expenses = total_daily_expenses + total_fixed;
        let total_profit = total_revenue - total_expenses;

        let total_sales_count: u32 = records.iter().map(|r| r.unit_sales.units_sold()).sum();

        // Average of per-day margins, NOT pooled profit over pooled revenue.
        let avg_profit_margin =
            records.iter().map(|r| r.profit_margin_pct).sum::<f64>() / count;

        // Stable descending sort by gross profit; ties keep stored order.
        let mut by_profit: Vec<&DailyRecord> = records.iter().collect();
        by_profit.sort_by(|a, b| {
            b.gross_profit
                .partial_cmp(&a.gross_profit)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let best_day = by_profit.first().map(|r| DayStamp {
            date: r.date,
            profit: r.gross_profit,
        });
        let worst_day = by_profit.last().map(|r| DayStamp {
            date: r.date,
            profit: r.gross_profit,
        });

        BusinessMetrics {
            total_revenue,
            total_expenses,
            total_profit,
            avg_daily_revenue: total_revenue / count,
            avg_daily_profit: total_profit / count,
            total_sales_count,
            avg_profit_margin,
            best_day,
            worst_day,
        }
    }

    /// Where the daily money went: raw material vs consumables, totaled over
    /// the whole history. Zero-amount slices are dropped.
    #[must_use]
    pub fn expense_breakdown(&self, records: &[DailyRecord]) -> Vec<ExpenseSlice> {
        let raw_material: f64 = records
            .iter()
            .flat_map(|r| &r.raw_purchases)
            .map(|p| p.line_cost)
            .sum();
        let consumables: f64 = records
            .iter()
            .flat_map(|r| &r.consumable_expenses)
            .map(|e| e.amount)
            .sum();

        let mut slices = Vec::new();
        if raw_material > 0.0 {
            slices.push(ExpenseSlice {
                label: "Raw Fruits".to_string(),
                amount: raw_material,
            });
        }
        if consumables > 0.0 {
            slices.push(ExpenseSlice {
                label: "Consumables".to_string(),
                amount: consumables,
            });
        }
        slices
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}
