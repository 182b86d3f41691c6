use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{check_amount, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesEntry {
    pub date: NaiveDate,
    pub revenue: f64,
    #[serde(default)]
    pub order_count: u32,
    #[serde(default)]
    pub channel: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub supplier: String,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseEntry {
    pub date: NaiveDate,
    #[serde(rename = "type", default)]
    pub expense_type: String,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManpowerEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub staff_count: u32,
    pub total_salaries: f64,
    #[serde(default)]
    pub overtime_hours: f64,
}

impl SalesEntry {
    pub fn validate(&self) -> Result<()> {
        check_amount("sales", "revenue", self.revenue)
    }
}

impl PurchaseEntry {
    pub fn validate(&self) -> Result<()> {
        check_amount("purchase", "amount", self.amount)
    }
}

impl ExpenseEntry {
    pub fn validate(&self) -> Result<()> {
        check_amount("expense", "amount", self.amount)
    }
}

impl ManpowerEntry {
    pub fn validate(&self) -> Result<()> {
        check_amount("manpower", "totalSalaries", self.total_salaries)?;
        check_amount("manpower", "overtimeHours", self.overtime_hours)
    }
}

/// The four manual ledger categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Sales,
    Purchase,
    Expense,
    Manpower,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Sales => "sales",
            EntryKind::Purchase => "purchase",
            EntryKind::Expense => "expense",
            EntryKind::Manpower => "manpower",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sales" | "sale" => Ok(EntryKind::Sales),
            "purchase" | "purchases" => Ok(EntryKind::Purchase),
            "expense" | "expenses" => Ok(EntryKind::Expense),
            "manpower" | "salaries" => Ok(EntryKind::Manpower),
            other => Err(format!(
                "unknown entry kind '{}' (expected sales, purchase, expense or manpower)",
                other
            )),
        }
    }
}

/// One committed ledger row, tagged by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEntry {
    Sales(SalesEntry),
    Purchase(PurchaseEntry),
    Expense(ExpenseEntry),
    Manpower(ManpowerEntry),
}

impl LedgerEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            LedgerEntry::Sales(_) => EntryKind::Sales,
            LedgerEntry::Purchase(_) => EntryKind::Purchase,
            LedgerEntry::Expense(_) => EntryKind::Expense,
            LedgerEntry::Manpower(_) => EntryKind::Manpower,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            LedgerEntry::Sales(e) => e.date,
            LedgerEntry::Purchase(e) => e.date,
            LedgerEntry::Expense(e) => e.date,
            LedgerEntry::Manpower(e) => e.date,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            LedgerEntry::Sales(e) => e.validate(),
            LedgerEntry::Purchase(e) => e.validate(),
            LedgerEntry::Expense(e) => e.validate(),
            LedgerEntry::Manpower(e) => e.validate(),
        }
    }
}

/// A user's manual ledger, one list per category.
///
/// Entries are appended or deleted, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSet {
    #[serde(default)]
    pub sales: Vec<SalesEntry>,
    #[serde(default)]
    pub purchases: Vec<PurchaseEntry>,
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
    #[serde(default)]
    pub manpower: Vec<ManpowerEntry>,
}

impl LedgerSet {
    pub fn push(&mut self, entry: LedgerEntry) {
        match entry {
            LedgerEntry::Sales(e) => self.sales.push(e),
            LedgerEntry::Purchase(e) => self.purchases.push(e),
            LedgerEntry::Expense(e) => self.expenses.push(e),
            LedgerEntry::Manpower(e) => self.manpower.push(e),
        }
    }

    pub fn count(&self, kind: EntryKind) -> usize {
        match kind {
            EntryKind::Sales => self.sales.len(),
            EntryKind::Purchase => self.purchases.len(),
            EntryKind::Expense => self.expenses.len(),
            EntryKind::Manpower => self.manpower.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.sales.len() + self.purchases.len() + self.expenses.len() + self.manpower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cash movement inferred by the CCTV analytics collaborator for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionCash {
    #[serde(default)]
    pub total_received: f64,
    #[serde(default)]
    pub total_withdrawals: f64,
    /// Passed through untouched.
    #[serde(default)]
    pub performance_scores: Value,
}

impl VisionCash {
    pub fn new(total_received: f64, total_withdrawals: f64) -> Self {
        Self {
            total_received,
            total_withdrawals,
            performance_scores: Value::Null,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_amount("vision", "totalReceived", self.total_received)?;
        check_amount("vision", "totalWithdrawals", self.total_withdrawals)
    }
}

/// Food-cost health tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCostStatus {
    Healthy,
    Warning,
    Critical,
}

impl FoodCostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCostStatus::Healthy => "healthy",
            FoodCostStatus::Warning => "warning",
            FoodCostStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for FoodCostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fiscal-health view recomputed from the live ledger on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalSnapshot {
    pub manual_sales_total: f64,
    pub manual_purchase_total: f64,
    pub manual_expense_total: f64,
    pub manual_salaries_total: f64,
    pub total_inflow: f64,
    pub total_outflow: f64,
    pub fiscal_balance: f64,
    pub food_cost_pct: f64,
    pub food_cost_status: FoodCostStatus,
}
