use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default sale price for a big combo box.
pub const DEFAULT_BIG_COMBO_PRICE: f64 = 59.0;
/// Default sale price for a medium combo box.
pub const DEFAULT_MEDIUM_COMBO_PRICE: f64 = 39.0;
/// Default sale price for a small box.
pub const DEFAULT_SMALL_BOX_PRICE: f64 = 29.0;
/// Default sale price for a juice-only serving.
pub const DEFAULT_JUICE_ONLY_PRICE: f64 = 20.0;

/// One purchase line from the morning market run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPurchase {
    /// What was bought (e.g., "Apple", "Banana")
    pub material: String,

    /// Quantity in kilograms
    pub quantity_kg: f64,

    /// Price per kilogram
    pub unit_price: f64,

    /// Cost of this line: quantity_kg × unit_price
    pub line_cost: f64,
}

impl RawPurchase {
    /// Create a purchase line; `line_cost` is computed from quantity and price.
    pub fn new(material: impl Into<String>, quantity_kg: f64, unit_price: f64) -> Self {
        Self {
            material: material.into(),
            quantity_kg,
            unit_price,
            line_cost: quantity_kg * unit_price,
        }
    }
}

/// How many boxes of each product category were produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducedUnits {
    pub big_combo: u32,
    pub medium_combo: u32,
    pub small_box: u32,
    pub juice_only: u32,
}

/// A batch of juice pressed during the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JuiceBatch {
    /// Juice type (e.g., "Orange", "Mixed")
    pub kind: String,

    /// Volume produced in liters
    pub liters: f64,
}

impl JuiceBatch {
    pub fn new(kind: impl Into<String>, liters: f64) -> Self {
        Self {
            kind: kind.into(),
            liters,
        }
    }
}

/// Sales of one product category: how many were sold and at what price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub quantity: u32,
    pub unit_price: f64,
}

impl SaleLine {
    pub fn new(quantity: u32, unit_price: f64) -> Self {
        Self {
            quantity,
            unit_price,
        }
    }

    /// Revenue from this category: quantity × unit_price.
    #[must_use]
    pub fn revenue(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// The four fixed sale categories of the stall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitSales {
    pub big_combo: SaleLine,
    pub medium_combo: SaleLine,
    pub small_box: SaleLine,
    pub juice_only: SaleLine,
}

impl UnitSales {
    /// Sale slots zeroed out but priced at the stall's standard rates.
    #[must_use]
    pub fn with_default_prices() -> Self {
        Self {
            big_combo: SaleLine::new(0, DEFAULT_BIG_COMBO_PRICE),
            medium_combo: SaleLine::new(0, DEFAULT_MEDIUM_COMBO_PRICE),
            small_box: SaleLine::new(0, DEFAULT_SMALL_BOX_PRICE),
            juice_only: SaleLine::new(0, DEFAULT_JUICE_ONLY_PRICE),
        }
    }

    /// Total revenue over all four categories.
    #[must_use]
    pub fn revenue(&self) -> f64 {
        self.big_combo.revenue()
            + self.medium_combo.revenue()
            + self.small_box.revenue()
            + self.juice_only.revenue()
    }

    /// Total units sold over all four categories.
    #[must_use]
    pub fn units_sold(&self) -> u32 {
        self.big_combo.quantity
            + self.medium_combo.quantity
            + self.small_box.quantity
            + self.juice_only.quantity
    }
}

/// A consumable expense for the day (ice, cups, boxes, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumableExpense {
    pub label: String,
    pub amount: f64,
}

impl ConsumableExpense {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// How the day felt to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Tough,
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mood::Great => write!(f, "great"),
            Mood::Good => write!(f, "good"),
            Mood::Okay => write!(f, "okay"),
            Mood::Tough => write!(f, "tough"),
        }
    }
}

/// The operator's qualitative end-of-day review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfReview {
    /// Free-text notes about the day
    pub notes: String,

    /// What was difficult
    pub challenges: String,

    /// What to do better tomorrow
    pub improvements: String,

    pub mood: Mood,

    /// Self-assigned rating, 1 (worst) to 5 (best)
    pub rating: u8,
}

impl Default for SelfReview {
    fn default() -> Self {
        Self {
            notes: String::new(),
            challenges: String::new(),
            improvements: String::new(),
            mood: Mood::Good,
            rating: 3,
        }
    }
}

/// Sort order for daily record listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSortOrder {
    /// Newest date first (default for display)
    DateDesc,
    /// Oldest date first
    DateAsc,
    /// Most profitable day first
    ProfitDesc,
    /// Least profitable day first
    ProfitAsc,
    /// Highest revenue first
    RevenueDesc,
    /// Lowest revenue first
    RevenueAsc,
}

/// One calendar day's full business activity log.
///
/// The `date` is the natural key: the store keeps at most one record per
/// date. Derived fields (`total_*`, `gross_profit`, `profit_margin_pct`,
/// `used_weight_kg`) are recomputed by the normalizer before every
/// persisted write; raw input fields are taken as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Unique identifier, assigned at creation
    pub id: Uuid,

    /// Calendar date — unique among stored records
    pub date: NaiveDate,

    /// Morning purchases of raw material
    pub raw_purchases: Vec<RawPurchase>,

    /// Boxes produced per category
    pub produced_units: ProducedUnits,

    /// Juice batches pressed
    pub produced_liquid: Vec<JuiceBatch>,

    /// Derived: Σ raw_purchases.quantity_kg
    pub total_raw_weight_kg: f64,

    /// Weight discarded as wastage (as entered)
    pub wastage_weight_kg: f64,

    /// Derived: total_raw_weight_kg − wastage_weight_kg (may go negative)
    pub used_weight_kg: f64,

    /// Sales per category
    pub unit_sales: UnitSales,

    /// Cash collected
    pub cash_amount: f64,

    /// Digital payments collected
    pub digital_amount: f64,

    /// Derived: cash_amount + digital_amount
    pub total_collected: f64,

    /// Consumable expenses for the day
    pub consumable_expenses: Vec<ConsumableExpense>,

    /// Derived: Σ unit_sales revenue
    pub total_revenue: f64,

    /// Derived: Σ purchase line costs + Σ consumable amounts
    pub total_expenses: f64,

    /// Derived: total_revenue − total_expenses
    pub gross_profit: f64,

    /// Derived: gross_profit / total_revenue × 100, or 0 when revenue is 0
    pub profit_margin_pct: f64,

    /// End-of-day self review
    pub self_review: SelfReview,

    /// Fixed at first creation
    pub created_at: DateTime<Utc>,

    /// Refreshed on every persisted mutation
    pub updated_at: DateTime<Utc>,
}

impl DailyRecord {
    /// Template factory: a fresh, zeroed record for `date` with the stall's
    /// default sale prices and a neutral self review.
    #[must_use]
    pub fn empty(date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            date,
            raw_purchases: Vec::new(),
            produced_units: ProducedUnits::default(),
            produced_liquid: Vec::new(),
            total_raw_weight_kg: 0.0,
            wastage_weight_kg: 0.0,
            used_weight_kg: 0.0,
            unit_sales: UnitSales::with_default_prices(),
            cash_amount: 0.0,
            digital_amount: 0.0,
            total_collected: 0.0,
            consumable_expenses: Vec::new(),
            total_revenue: 0.0,
            total_expenses: 0.0,
            gross_profit: 0.0,
            profit_margin_pct: 0.0,
            self_review: SelfReview::default(),
            created_at: now,
            updated_at: now,
        }
    }
}
