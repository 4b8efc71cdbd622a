use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A (date, profit) pair marking a notable day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayStamp {
    pub date: NaiveDate,
    pub profit: f64,
}

/// Business-wide statistics over the full daily-record history.
///
/// Recomputed on demand, never persisted. With no daily records all numeric
/// fields are zero and `best_day`/`worst_day` are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessMetrics {
    /// Σ daily total_revenue
    pub total_revenue: f64,

    /// Σ daily total_expenses + Σ fixed expense amounts
    pub total_expenses: f64,

    /// total_revenue − total_expenses
    pub total_profit: f64,

    /// total_revenue / number of tracked days
    pub avg_daily_revenue: f64,

    /// total_profit / number of tracked days
    pub avg_daily_profit: f64,

    /// Units sold across all days and all four categories
    pub total_sales_count: u32,

    /// Mean of each day's stored margin percentage.
    ///
    /// This is the average of per-day ratios — NOT pooled profit over pooled
    /// revenue — so small-revenue days weigh as much as big ones.
    pub avg_profit_margin: f64,

    /// The day with the highest gross profit
    pub best_day: Option<DayStamp>,

    /// The day with the lowest gross profit
    pub worst_day: Option<DayStamp>,
}

impl BusinessMetrics {
    /// The all-zero metrics reported for an empty history.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            total_revenue: 0.0,
            total_expenses: 0.0,
            total_profit: 0.0,
            avg_daily_revenue: 0.0,
            avg_daily_profit: 0.0,
            total_sales_count: 0,
            avg_profit_margin: 0.0,
            best_day: None,
            worst_day: None,
        }
    }
}

/// One slice of the where-does-the-money-go breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSlice {
    /// Slice label (e.g., "Raw Fruits", "Consumables")
    pub label: String,

    pub amount: f64,
}
