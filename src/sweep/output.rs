use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::sweep::search::SweepResults;

/// Round to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Print the `topk` least stable items.
pub fn print_fragile(results: &SweepResults, topk: usize) {
    println!(
        "=== Least stable items ({} samples, seed {}) ===",
        results.iterations, results.seed
    );
    println!();

    if results.items.is_empty() {
        println!("(no items)");
        println!();
        return;
    }

    let name_width = results
        .items
        .iter()
        .take(topk)
        .map(|i| i.name.len())
        .max()
        .unwrap_or(10);

    for (i, item) in results.items.iter().take(topk).enumerate() {
        let flip = item
            .most_common_flip
            .map(|l| format!(" -> {}", l))
            .unwrap_or_default();
        println!(
            "{:>3}. {:<width$}  {:<9} pop {:>5.1} prof {:>5.1}  stability {:>5.1}%{}",
            i + 1,
            item.name,
            item.baseline.as_str(),
            item.popularity_score,
            item.profitability_score,
            item.stability * 100.0,
            flip,
            width = name_width
        );
    }
    println!();
}

/// Write per-item stability to a CSV file.
pub fn write_csv(results: &SweepResults, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "sku_id",
        "name",
        "baseline",
        "popularity_score",
        "profitability_score",
        "stability",
        "most_common_flip",
    ])?;

    for (i, item) in results.items.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            item.sku_id.clone(),
            item.name.clone(),
            item.baseline.to_string(),
            format!("{:.2}", item.popularity_score),
            format!("{:.2}", item.profitability_score),
            format!("{:.3}", item.stability),
            item.most_common_flip
                .map(|l| l.to_string())
                .unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write baseline counts and the fragile item list to JSON.
pub fn write_summary_json(results: &SweepResults, cutoff: f64, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "iterations": results.iterations,
        "seed": results.seed,
        "baselineCounts": results.baseline_counts,
        "fragileCutoff": cutoff,
        "fragile": results.fragile(cutoff).iter().map(|item| {
            serde_json::json!({
                "skuId": item.sku_id,
                "name": item.name,
                "baseline": item.baseline,
                "stability": truncate(item.stability, 3),
                "mostCommonFlip": item.most_common_flip,
            })
        }).collect::<Vec<_>>(),
    });

    fs::write(path, serde_json::to_string_pretty(&json)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::models::MenuEngineeringItem;
    use crate::sweep::search::{run_sweep, SweepConfig};
    use tempfile::tempdir;

    fn results() -> SweepResults {
        let base = EngineConfig::default();
        let items = vec![
            MenuEngineeringItem::new("MID", "Midline", 100.0, 5.0, 80, &base),
            MenuEngineeringItem::new("FAR", "Far Star", 100.0, 5.0, 1000, &base),
        ];
        run_sweep(
            &SweepConfig {
                iterations: 100,
                ..Default::default()
            },
            &items,
        )
        .unwrap()
    }

    #[test]
    fn test_write_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.csv");
        write_csv(&results(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("rank,sku_id"));
        assert!(lines[1].starts_with("1,MID,"));
    }

    #[test]
    fn test_write_summary_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        write_summary_json(&results(), 0.9, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["baselineCounts"]["STAR"], 2);
        assert_eq!(value["fragile"][0]["skuId"], "MID");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate(0.12345, 3), 0.123);
    }
}
