use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a one-time capital/setup cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    /// Durable gear — juicer, cutting board, display stand
    Equipment,
    /// One-off setup work — signboard, counter build-out
    Setup,
    /// Permits and licenses
    License,
    Other,
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseCategory::Equipment => write!(f, "equipment"),
            ExpenseCategory::Setup => write!(f, "setup"),
            ExpenseCategory::License => write!(f, "license"),
            ExpenseCategory::Other => write!(f, "other"),
        }
    }
}

/// A one-time capital/setup cost, independent of any day's operations.
///
/// Fixed expenses are keyed by `id` — unlike daily records, several may
/// share a date. They carry no derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: Uuid,

    /// What the money went to (e.g., "Juicer Machine")
    pub name: String,

    pub amount: f64,

    pub category: ExpenseCategory,

    /// When the cost was incurred
    pub date: NaiveDate,

    #[serde(default)]
    pub notes: Option<String>,
}

impl FixedExpense {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        category: ExpenseCategory,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            category,
            date,
            notes: None,
        }
    }

    /// Create a fixed expense with notes attached.
    pub fn with_notes(
        name: impl Into<String>,
        amount: f64,
        category: ExpenseCategory,
        date: NaiveDate,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            category,
            date,
            notes: Some(notes.into()),
        }
    }
}
