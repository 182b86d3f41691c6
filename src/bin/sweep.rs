use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use menu_engineer_rs::engine::EngineConfig;
use menu_engineer_rs::state::{load_recipes, MenuBook};
use menu_engineer_rs::sweep::{
    parse_range, print_fragile, run_sweep, write_csv, write_summary_json, SweepConfig,
    SweepRanges,
};

#[derive(Parser, Debug)]
#[command(name = "sweep")]
#[command(about = "Quadrant sensitivity sweep over the menu-engineering thresholds")]
struct Args {
    /// Number of sampled configurations
    #[arg(long, default_value = "500")]
    iters: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Path to recipes.json
    #[arg(long, default_value = "recipes.json")]
    recipes: PathBuf,

    /// Optional TOML config for the baseline thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Popularity volume ceiling range, LO:HI
    #[arg(long, default_value = "120:200", value_parser = parse_range)]
    ceiling: (f64, f64),

    /// Profitability margin ratio range, LO:HI
    #[arg(long, default_value = "0.6:1.0", value_parser = parse_range)]
    ratio: (f64, f64),

    /// Classification threshold range, LO:HI
    #[arg(long, default_value = "40:60", value_parser = parse_range)]
    threshold: (f64, f64),

    /// Items below this stability are reported as fragile
    #[arg(long, default_value = "0.8")]
    cutoff: f64,

    /// Output CSV file for all items
    #[arg(long, default_value = "sweep_results.csv")]
    csv: PathBuf,

    /// Output JSON summary
    #[arg(long, default_value = "sweep_summary.json")]
    json: PathBuf,

    /// Number of least stable items to display
    #[arg(long, default_value = "10")]
    topk: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let base = match EngineConfig::load_or_default(args.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let recipes = match load_recipes(&args.recipes) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error reading recipes {:?}: {}", args.recipes, e);
            std::process::exit(1);
        }
    };

    let book = MenuBook::new(recipes);
    let items = book.items(&base);
    println!("Loaded {} scorable items from {:?}", items.len(), args.recipes);

    let config = SweepConfig {
        iterations: args.iters,
        seed: args.seed,
        ranges: SweepRanges {
            volume_ceiling: args.ceiling,
            margin_ratio: args.ratio,
            threshold: args.threshold,
        },
        base,
    };

    let results = match run_sweep(&config, &items) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Baseline: {}",
        results
            .baseline_counts
            .iter()
            .map(|(label, n)| format!("{}={}", label, n))
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!();

    print_fragile(&results, args.topk);

    let fragile = results.fragile(args.cutoff).len();
    println!(
        "{} of {} items keep their quadrant less than {:.0}% of the time",
        fragile,
        results.items.len(),
        args.cutoff * 100.0
    );
    println!();

    if let Err(e) = write_csv(&results, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
    } else {
        println!("Wrote all items to {:?}", args.csv);
    }

    if let Err(e) = write_summary_json(&results, args.cutoff, &args.json) {
        eprintln!("Error writing JSON: {}", e);
    } else {
        println!("Wrote summary to {:?}", args.json);
    }
}
