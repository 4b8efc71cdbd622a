use chrono::{Duration, NaiveDate};

use crate::models::chart::DayPoint;
use crate::models::record::DailyRecord;

/// Projects the daily-record history into chart-ready per-day series.
///
/// The evaluation date is passed in explicitly so the trailing window is
/// deterministic under test; the facade supplies today's date.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Map the trailing `window_weeks` of history into a per-day series.
    ///
    /// The window keeps every record dated on or after
    /// `today − window_weeks × 7 days` — the lower bound is inclusive and
    /// there is no upper bound, so future-dated records pass through.
    /// Points are sorted ascending by date for a monotonic x-axis.
    #[must_use]
    pub fn project(
        &self,
        records: &[DailyRecord],
        window_weeks: u32,
        today: NaiveDate,
    ) -> Vec<DayPoint> {
        let window_start = today - Duration::days(i64::from(window_weeks) * 7);

        let mut points: Vec<DayPoint> = records
            .iter()
            .filter(|r| r.date >= window_start)
            .map(|r| DayPoint {
                date: r.date,
                revenue: r.total_revenue,
                profit: r.gross_profit,
                expenses: r.total_expenses,
                units_sold: r.unit_sales.units_sold(),
            })
            .collect();

        points.sort_by_key(|p| p.date);
        points
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
