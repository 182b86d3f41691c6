pub mod evaluation;
pub mod output;
pub mod ranges;
pub mod search;

pub use evaluation::{evaluate_stability, ItemStability};
pub use output::{print_fragile, write_csv, write_summary_json};
pub use ranges::{parse_range, SweepRanges};
pub use search::{run_sweep, SweepConfig, SweepResults};
