use crate::engine::analysis::MenuAnalysis;
use crate::engine::config::EngineConfig;
use crate::engine::costing::{food_cost_pct_of_price, RatioWarning, SavingsProjection};
use crate::engine::health::classify_food_cost_for;
use crate::engine::ledger::{ChannelTotals, LedgerAggregate, PeriodSnapshot};
use crate::models::{CategoryLabel, MenuEngineeringItem, RecipeCard};

/// Display scored menu items grouped by quadrant, then the summary.
pub fn display_menu(items: &[MenuEngineeringItem], analysis: &MenuAnalysis) {
    if items.is_empty() {
        println!("No menu items to analyze (no valid recipes loaded).");
        return;
    }

    let name_width = items.iter().map(|i| i.name.len()).max().unwrap_or(10);

    println!();
    println!("=== Menu Engineering ===");

    for label in CategoryLabel::ALL {
        let group: Vec<&MenuEngineeringItem> = items
            .iter()
            .filter(|i| i.category_label() == label)
            .collect();
        if group.is_empty() {
            continue;
        }

        println!();
        println!("--- {} ({}) - {} ---", label, group.len(), label.strategy());
        for item in group {
            let essential = if item.is_essential { "  [Essential]" } else { "" };
            println!(
                "  {:<10} {:<width$}  price {:>8.2}  cost {:>8.2}  margin {:>8.2}  sold {:>5}  pop {:>5.1}  prof {:>5.1}{}",
                item.sku_id,
                item.name,
                item.current_price(),
                item.food_cost_per_serving(),
                item.contribution_margin(),
                item.sales_volume(),
                item.popularity_score(),
                item.profitability_score(),
                essential,
                width = name_width
            );
            if !item.ai_recommendation.is_empty() {
                println!("  {:<10} > {}", "", item.ai_recommendation);
            }
        }
    }

    println!();
    println!("--- Summary ---");
    println!(
        "Items: {} (STAR {}, PLOWHORSE {}, PUZZLE {}, DOG {})",
        analysis.item_count, analysis.stars, analysis.plowhorses, analysis.puzzles, analysis.dogs
    );
    println!("Units sold: {}", analysis.total_units_sold);
    println!("Total contribution: {:.2}", analysis.total_contribution);
    println!("Average margin: {:.2}", analysis.average_margin);
    println!("Weighted food cost: {:.2}%", analysis.weighted_food_cost_pct);
    if !analysis.essential_dogs.is_empty() {
        println!(
            "Kept despite DOG quadrant: {}",
            analysis.essential_dogs.join(", ")
        );
    }
    println!();
}

/// Display an ingredient-level cost breakdown for one recipe.
pub fn display_costing(recipe: &RecipeCard, item: &MenuEngineeringItem, config: &EngineConfig) {
    println!();
    println!("=== {} ({}) ===", recipe.name, recipe.sku_id);
    println!();

    let name_width = recipe
        .ingredients
        .iter()
        .map(|i| i.name.len())
        .max()
        .unwrap_or(10);

    for ing in &recipe.ingredients {
        let waste = if ing.waste_pct > 0.0 {
            format!("  waste {:.1}%", ing.waste_pct)
        } else {
            String::new()
        };
        println!(
            "  {:<width$}  {:>8.3} {:<5} x {:>8.2} = {:>8.2}{}",
            ing.name,
            ing.quantity_per_serving,
            ing.unit,
            ing.cost_per_unit,
            ing.cost_per_serving(),
            waste,
            width = name_width
        );
    }

    let cost = item.food_cost_per_serving();
    let cost_pct = food_cost_pct_of_price(cost, item.current_price());

    println!();
    println!("Food cost per serving: {:.2}", cost);
    println!(
        "Selling price: {:.2} (food cost {:.1}%, {})",
        item.current_price(),
        cost_pct,
        classify_food_cost_for(cost_pct, config)
    );
    println!("Contribution margin: {:.2}", item.contribution_margin());
    let suggested = recipe.suggested_price(config.target_food_cost_pct);
    let mut at_suggested = item.clone();
    at_suggested.reprice(suggested, config);
    println!(
        "Suggested price at {:.0}% food cost: {:.2} (would be {})",
        config.target_food_cost_pct,
        suggested,
        at_suggested.category_label()
    );
    println!(
        "Batch cost ({} servings): {:.2}",
        recipe.yield_count,
        recipe.batch_cost()
    );
    println!(
        "Quadrant: {} (pop {:.1}, prof {:.1})",
        item.category_label(),
        item.popularity_score(),
        item.profitability_score()
    );
    println!();
}

/// Display a what-if savings projection.
pub fn display_projection(recipe: &RecipeCard, projection: &SavingsProjection) {
    println!();
    println!("=== What-if: {} ===", recipe.name);
    println!();

    if !projection.has_changes {
        println!("No changes entered; cost is unchanged.");
        println!();
        return;
    }

    println!("Original cost per serving:  {:.2}", projection.original_cost);
    println!("Projected cost per serving: {:.2}", projection.projected_cost);

    let label = if projection.savings >= 0.0 {
        "Savings"
    } else {
        "Extra cost"
    };
    println!(
        "{}: {:.2} ({:.2}%)",
        label,
        projection.savings.abs(),
        projection.savings_pct.abs()
    );

    for warning in &projection.warnings {
        match warning {
            RatioWarning::WasteClamped { index, requested } => {
                let name = recipe
                    .ingredients
                    .get(*index)
                    .map(|i| i.name.as_str())
                    .unwrap_or("?");
                println!(
                    "Warning: waste {:.1}% on {} was capped; projected cost is extreme.",
                    requested, name
                );
            }
            RatioWarning::ZeroOriginalRate { index } => {
                let name = recipe
                    .ingredients
                    .get(*index)
                    .map(|i| i.name.as_str())
                    .unwrap_or("?");
                println!(
                    "Warning: {} has no original rate, so the new rate could not be applied.",
                    name
                );
            }
        }
    }
    println!();
}

/// Display the fiscal snapshot, channel mix and any rejected rows.
pub fn display_fiscal(aggregate: &LedgerAggregate, channels: &[ChannelTotals]) {
    let s = &aggregate.snapshot;

    println!();
    println!("=== Fiscal Health ===");
    println!();
    println!("Sales:      {:>12.2}", s.manual_sales_total);
    println!(
        "Vision in:  {:>12.2}",
        s.total_inflow - s.manual_sales_total
    );
    println!("Inflow:     {:>12.2}", s.total_inflow);
    println!();
    println!("Purchases:  {:>12.2}", s.manual_purchase_total);
    println!("Expenses:   {:>12.2}", s.manual_expense_total);
    println!("Salaries:   {:>12.2}", s.manual_salaries_total);
    println!("Outflow:    {:>12.2}", s.total_outflow);
    println!();
    println!("Balance:    {:>12.2}", s.fiscal_balance);
    println!(
        "Food cost:  {:>11.2}%  ({})",
        s.food_cost_pct, s.food_cost_status
    );

    if !channels.is_empty() {
        println!();
        println!("--- Sales by channel ---");
        for c in channels {
            println!(
                "  {:<14} {:>12.2}  ({} orders)",
                c.channel, c.revenue, c.order_count
            );
        }
    }

    if !aggregate.rejected.is_empty() {
        println!();
        println!("--- Skipped {} invalid entries ---", aggregate.rejected.len());
        for r in &aggregate.rejected {
            println!("  {} #{}: {}", r.source, r.index, r.error);
        }
    }
    println!();
}

/// Display per-month snapshots.
pub fn display_periods(periods: &[PeriodSnapshot]) {
    if periods.is_empty() {
        println!("No dated ledger entries.");
        return;
    }

    println!("--- By month ---");
    println!(
        "  {:<8} {:>12} {:>12} {:>12} {:>9}  status",
        "period", "inflow", "outflow", "balance", "food %"
    );
    for p in periods {
        let s = &p.snapshot;
        println!(
            "  {:<8} {:>12.2} {:>12.2} {:>12.2} {:>8.2}%  {}",
            p.period,
            s.total_inflow,
            s.total_outflow,
            s.fiscal_balance,
            s.food_cost_pct,
            s.food_cost_status
        );
    }
    println!();
}
