//! Demo-data generation: a trailing month of plausible stall activity so a
//! fresh install has something to show on the dashboard.

use chrono::{Duration, NaiveDate};

use crate::models::expense::{ExpenseCategory, FixedExpense};
use crate::models::record::{
    ConsumableExpense, DailyRecord, Mood, RawPurchase, SaleLine, SelfReview, UnitSales,
    DEFAULT_BIG_COMBO_PRICE, DEFAULT_JUICE_ONLY_PRICE, DEFAULT_MEDIUM_COMBO_PRICE,
    DEFAULT_SMALL_BOX_PRICE,
};
use crate::services::record_service::RecordService;

/// Seed used by the facade so demo data is reproducible.
pub const DEFAULT_SEED: u64 = 0x5747_414c_4c21;

/// Small deterministic generator (xorshift64). Demo data only needs to look
/// varied, not be random.
struct XorShift(u64);

impl XorShift {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform-ish value in `lo..hi`.
    fn in_range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next() % u64::from(hi - lo)) as u32
    }

    /// Value in `0.0..1.0`.
    fn unit(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Generate roughly a month of trailing daily records ending today.
/// Some days are skipped, as a real log would have gaps. Every record is
/// fully normalized.
#[must_use]
pub fn sample_daily_records(today: NaiveDate, seed: u64) -> Vec<DailyRecord> {
    let mut rng = XorShift::new(seed);
    let service = RecordService::new();
    let mut records = Vec::new();

    for days_back in (0..=30).rev() {
        // Stall stays shut now and then
        if rng.unit() > 0.85 {
            continue;
        }

        let date = today - Duration::days(days_back);
        let mut record = DailyRecord::empty(date);

        record.raw_purchases = vec![
            RawPurchase::new("Apple", 3.0, 120.0),
            RawPurchase::new("Banana", 2.0, 40.0),
            RawPurchase::new("Orange", 4.0, 80.0),
            RawPurchase::new("Grapes", 1.5, 100.0),
        ];

        record.unit_sales = UnitSales {
            big_combo: SaleLine::new(rng.in_range(20, 50), DEFAULT_BIG_COMBO_PRICE),
            medium_combo: SaleLine::new(rng.in_range(15, 40), DEFAULT_MEDIUM_COMBO_PRICE),
            small_box: SaleLine::new(rng.in_range(10, 30), DEFAULT_SMALL_BOX_PRICE),
            juice_only: SaleLine::new(rng.in_range(5, 20), DEFAULT_JUICE_ONLY_PRICE),
        };

        record.consumable_expenses = vec![
            ConsumableExpense::new("Cups & Boxes", 100.0),
            ConsumableExpense::new("Ice", 50.0),
        ];

        let revenue = record.unit_sales.revenue();
        record.cash_amount = (revenue * 0.6).floor();
        record.digital_amount = (revenue * 0.4).floor();
        record.wastage_weight_kg = rng.unit() * 0.5;

        record.self_review = SelfReview {
            notes: "Good day overall".to_string(),
            challenges: "Morning rush was intense".to_string(),
            improvements: "Prepare more medium combos".to_string(),
            mood: match rng.in_range(0, 3) {
                0 => Mood::Great,
                1 => Mood::Good,
                _ => Mood::Okay,
            },
            rating: rng.in_range(3, 5) as u8,
        };

        records.push(service.normalize(record));
    }

    records
}

/// The starter set of one-time costs a stall like this begins with.
#[must_use]
pub fn sample_fixed_expenses(opening_day: NaiveDate) -> Vec<FixedExpense> {
    vec![
        FixedExpense::new(
            "Fruit Cutting Board",
            500.0,
            ExpenseCategory::Equipment,
            opening_day,
        ),
        FixedExpense::new(
            "Display Stand",
            2000.0,
            ExpenseCategory::Equipment,
            opening_day,
        ),
        FixedExpense::new(
            "Juicer Machine",
            3500.0,
            ExpenseCategory::Equipment,
            opening_day,
        ),
        FixedExpense::new("Signboard", 1500.0, ExpenseCategory::Setup, opening_day),
    ]
}
