pub mod prompts;
pub mod render;

pub use prompts::{prompt_overrides, prompt_yes_no, rank_matches, resolve_sku};
pub use render::{
    display_costing, display_fiscal, display_menu, display_periods, display_projection,
};
