use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single per-day point of the trailing-window chart series.
///
/// The core computes these — the frontend just renders them. Points are
/// always emitted in ascending date order so the x-axis is monotonic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPoint {
    pub date: NaiveDate,

    /// The day's total revenue
    pub revenue: f64,

    /// The day's gross profit
    pub profit: f64,

    /// The day's total expenses
    pub expenses: f64,

    /// Units sold that day across all four categories
    pub units_sold: u32,
}
