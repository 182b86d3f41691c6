use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::config::EngineConfig;
use crate::engine::health;
use crate::error::MenuError;
use crate::models::{FiscalSnapshot, LedgerSet, VisionCash};

/// A ledger row (or the vision record) left out of aggregation.
#[derive(Debug)]
pub struct RejectedEntry {
    /// Ledger category name, or `"vision"`.
    pub source: &'static str,
    pub index: usize,
    pub error: MenuError,
}

/// Snapshot plus every record that failed validation.
#[derive(Debug)]
pub struct LedgerAggregate {
    pub snapshot: FiscalSnapshot,
    pub rejected: Vec<RejectedEntry>,
}

/// Snapshot for one calendar month (`YYYY-MM`), manual entries only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSnapshot {
    pub period: String,
    pub snapshot: FiscalSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTotals {
    pub channel: String,
    pub revenue: f64,
    pub order_count: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct ManualTotals {
    sales: f64,
    purchases: f64,
    expenses: f64,
    salaries: f64,
}

/// Reduce the manual ledger plus optional vision cash into a fiscal snapshot
/// using the default food-cost benchmarks.
pub fn aggregate(ledger: &LedgerSet, vision: Option<&VisionCash>) -> LedgerAggregate {
    aggregate_with(ledger, vision, &EngineConfig::default())
}

/// As [`aggregate`], with configured benchmarks.
///
/// Invalid rows are rejected individually and contribute nothing; the rest
/// of the ledger is still aggregated. Missing or invalid vision data counts
/// as zero.
pub fn aggregate_with(
    ledger: &LedgerSet,
    vision: Option<&VisionCash>,
    config: &EngineConfig,
) -> LedgerAggregate {
    let mut rejected = Vec::new();
    let mut totals = ManualTotals::default();

    let mut keep = |source: &'static str, index: usize, check: crate::error::Result<()>| match check
    {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!("Skipping {} entry #{}: {}", source, index, error);
            rejected.push(RejectedEntry {
                source,
                index,
                error,
            });
            false
        }
    };

    for (i, e) in ledger.sales.iter().enumerate() {
        if keep("sales", i, e.validate()) {
            totals.sales += e.revenue;
        }
    }
    for (i, e) in ledger.purchases.iter().enumerate() {
        if keep("purchase", i, e.validate()) {
            totals.purchases += e.amount;
        }
    }
    for (i, e) in ledger.expenses.iter().enumerate() {
        if keep("expense", i, e.validate()) {
            totals.expenses += e.amount;
        }
    }
    for (i, e) in ledger.manpower.iter().enumerate() {
        if keep("manpower", i, e.validate()) {
            totals.salaries += e.total_salaries;
        }
    }

    let (received, withdrawals) = match vision {
        Some(v) if keep("vision", 0, v.validate()) => (v.total_received, v.total_withdrawals),
        _ => (0.0, 0.0),
    };

    let snapshot = build_snapshot(totals, received, withdrawals, config);
    tracing::debug!(
        "Aggregated ledger: inflow {:.2}, outflow {:.2}, food cost {:.2}% ({} rejected)",
        snapshot.total_inflow,
        snapshot.total_outflow,
        snapshot.food_cost_pct,
        rejected.len()
    );

    LedgerAggregate { snapshot, rejected }
}

fn build_snapshot(
    totals: ManualTotals,
    vision_received: f64,
    vision_withdrawals: f64,
    config: &EngineConfig,
) -> FiscalSnapshot {
    let total_inflow = totals.sales + vision_received;
    let total_outflow = totals.purchases + totals.expenses + totals.salaries + vision_withdrawals;
    let food_cost_pct = if total_inflow > 0.0 {
        (totals.purchases / total_inflow) * 100.0
    } else {
        0.0
    };

    FiscalSnapshot {
        manual_sales_total: totals.sales,
        manual_purchase_total: totals.purchases,
        manual_expense_total: totals.expenses,
        manual_salaries_total: totals.salaries,
        total_inflow,
        total_outflow,
        fiscal_balance: total_inflow - total_outflow,
        food_cost_pct,
        food_cost_status: health::classify_food_cost_for(food_cost_pct, config),
    }
}

fn period_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Per-month snapshots in ascending order. Vision cash is undated and only
/// appears in the overall snapshot; invalid rows are skipped silently here
/// since [`aggregate_with`] already reports them.
pub fn aggregate_by_period(ledger: &LedgerSet, config: &EngineConfig) -> Vec<PeriodSnapshot> {
    let mut periods: BTreeMap<String, ManualTotals> = BTreeMap::new();

    for e in ledger.sales.iter().filter(|e| e.validate().is_ok()) {
        periods.entry(period_key(e.date)).or_default().sales += e.revenue;
    }
    for e in ledger.purchases.iter().filter(|e| e.validate().is_ok()) {
        periods.entry(period_key(e.date)).or_default().purchases += e.amount;
    }
    for e in ledger.expenses.iter().filter(|e| e.validate().is_ok()) {
        periods.entry(period_key(e.date)).or_default().expenses += e.amount;
    }
    for e in ledger.manpower.iter().filter(|e| e.validate().is_ok()) {
        periods.entry(period_key(e.date)).or_default().salaries += e.total_salaries;
    }

    periods
        .into_iter()
        .map(|(period, totals)| PeriodSnapshot {
            period,
            snapshot: build_snapshot(totals, 0.0, 0.0, config),
        })
        .collect()
}

/// Revenue and orders per sales channel, highest revenue first.
///
/// Channel names are grouped case-insensitively; blank channels group as
/// `"unspecified"`.
pub fn channel_breakdown(ledger: &LedgerSet) -> Vec<ChannelTotals> {
    let mut by_channel: HashMap<String, ChannelTotals> = HashMap::new();

    for e in ledger.sales.iter().filter(|e| e.validate().is_ok()) {
        let key = match e.channel.trim() {
            "" => "unspecified".to_string(),
            c => c.to_lowercase(),
        };
        let totals = by_channel.entry(key.clone()).or_insert(ChannelTotals {
            channel: key,
            revenue: 0.0,
            order_count: 0,
        });
        totals.revenue += e.revenue;
        totals.order_count += u64::from(e.order_count);
    }

    let mut channels: Vec<ChannelTotals> = by_channel.into_values().collect();
    channels.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.channel.cmp(&b.channel))
    });
    channels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseEntry, FoodCostStatus, ManpowerEntry, PurchaseEntry, SalesEntry};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn sale(m: u32, revenue: f64, channel: &str) -> SalesEntry {
        SalesEntry {
            date: date(m, 1),
            revenue,
            order_count: 10,
            channel: channel.to_string(),
        }
    }

    fn purchase(m: u32, amount: f64) -> PurchaseEntry {
        PurchaseEntry {
            date: date(m, 2),
            supplier: "Metro".to_string(),
            amount,
            category: "produce".to_string(),
        }
    }

    #[test]
    fn test_empty_ledger() {
        let agg = aggregate(&LedgerSet::default(), None);
        assert_eq!(agg.snapshot.food_cost_pct, 0.0);
        assert_eq!(agg.snapshot.fiscal_balance, 0.0);
        assert_eq!(agg.snapshot.food_cost_status, FoodCostStatus::Healthy);
        assert!(agg.rejected.is_empty());
    }

    #[test]
    fn test_vision_cash_included() {
        let ledger = LedgerSet {
            sales: vec![sale(1, 1000.0, "pos")],
            purchases: vec![purchase(1, 300.0)],
            ..Default::default()
        };
        let vision = VisionCash::new(500.0, 200.0);

        let agg = aggregate(&ledger, Some(&vision));
        assert_eq!(agg.snapshot.total_inflow, 1500.0);
        assert_eq!(agg.snapshot.total_outflow, 500.0);
        assert_eq!(agg.snapshot.fiscal_balance, 1000.0);
        assert!((agg.snapshot.food_cost_pct - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_balance_not_clamped() {
        let ledger = LedgerSet {
            sales: vec![sale(1, 100.0, "")],
            expenses: vec![ExpenseEntry {
                date: date(1, 3),
                expense_type: "rent".to_string(),
                amount: 400.0,
                note: String::new(),
            }],
            ..Default::default()
        };
        assert_eq!(aggregate(&ledger, None).snapshot.fiscal_balance, -300.0);
    }

    #[test]
    fn test_invalid_rows_rejected_individually() {
        let ledger = LedgerSet {
            sales: vec![sale(1, 1000.0, "pos"), sale(1, -50.0, "pos")],
            purchases: vec![purchase(1, f64::NAN), purchase(1, 250.0)],
            ..Default::default()
        };

        let agg = aggregate(&ledger, Some(&VisionCash::new(-1.0, 0.0)));
        assert_eq!(agg.snapshot.total_inflow, 1000.0);
        assert_eq!(agg.snapshot.manual_purchase_total, 250.0);
        assert_eq!(agg.rejected.len(), 3);
        assert_eq!(agg.rejected[0].source, "sales");
        assert_eq!(agg.rejected[0].index, 1);
        assert_eq!(agg.rejected[1].source, "purchase");
        assert_eq!(agg.rejected[1].index, 0);
        assert_eq!(agg.rejected[2].source, "vision");
    }

    #[test]
    fn test_configured_health() {
        let ledger = LedgerSet {
            sales: vec![sale(1, 100.0, "pos")],
            purchases: vec![purchase(1, 29.0)],
            ..Default::default()
        };
        let config = EngineConfig {
            food_cost_healthy_max: 25.0,
            ..Default::default()
        };
        let agg = aggregate_with(&ledger, None, &config);
        assert_eq!(agg.snapshot.food_cost_status, FoodCostStatus::Warning);
    }

    #[test]
    fn test_aggregate_by_period() {
        let ledger = LedgerSet {
            sales: vec![sale(2, 800.0, "pos"), sale(1, 1000.0, "pos")],
            purchases: vec![purchase(1, 500.0)],
            manpower: vec![ManpowerEntry {
                date: date(2, 28),
                staff_count: 3,
                total_salaries: 600.0,
                overtime_hours: 0.0,
            }],
            ..Default::default()
        };

        let periods = aggregate_by_period(&ledger, &EngineConfig::default());
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].period, "2025-01");
        assert_eq!(periods[0].snapshot.food_cost_status, FoodCostStatus::Critical);
        assert_eq!(periods[1].period, "2025-02");
        assert_eq!(periods[1].snapshot.fiscal_balance, 200.0);
    }

    #[test]
    fn test_period_and_channel_views_skip_invalid_rows() {
        let ledger = LedgerSet {
            sales: vec![
                sale(1, 1000.0, "pos"),
                sale(1, -400.0, "pos"),
                sale(2, -10.0, "delivery"),
            ],
            purchases: vec![purchase(1, f64::NAN), purchase(1, 300.0)],
            ..Default::default()
        };

        let periods = aggregate_by_period(&ledger, &EngineConfig::default());
        // February only has a rejected row
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].period, "2025-01");
        assert_eq!(periods[0].snapshot.manual_sales_total, 1000.0);
        assert_eq!(periods[0].snapshot.manual_purchase_total, 300.0);
        assert_eq!(periods[0].snapshot.fiscal_balance, 700.0);
        assert_eq!(periods[0].snapshot.food_cost_status, FoodCostStatus::Healthy);

        let channels = channel_breakdown(&ledger);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].channel, "pos");
        assert_eq!(channels[0].revenue, 1000.0);
        assert_eq!(channels[0].order_count, 10);
    }

    #[test]
    fn test_channel_breakdown() {
        let ledger = LedgerSet {
            sales: vec![
                sale(1, 100.0, "POS"),
                sale(1, 300.0, "delivery"),
                sale(1, 50.0, "pos"),
                sale(1, 20.0, " "),
            ],
            ..Default::default()
        };

        let channels = channel_breakdown(&ledger);
        assert_eq!(channels.len(), 3);
        assert_eq!(channels[0].channel, "delivery");
        assert_eq!(channels[1].channel, "pos");
        assert_eq!(channels[1].revenue, 150.0);
        assert_eq!(channels[1].order_count, 20);
        assert_eq!(channels[2].channel, "unspecified");
    }
}
