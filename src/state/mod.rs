mod manager;
mod persistence;
mod repository;

pub use manager::MenuBook;
pub use persistence::{
    append_ledger_rows, import_ledger_csv, load_ledger, load_ledger_checked, load_recipes,
    load_vision, remove_ledger_row, save_ledger, save_recipes, set_essential_in_file,
};
pub use repository::{JsonLedgerStore, JsonRecipeStore, LedgerRepository, RecipeRepository};
