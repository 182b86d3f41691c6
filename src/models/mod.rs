mod ingredient;
mod ledger;
mod menu_item;

pub use ingredient::{Ingredient, RecipeCard};
pub use ledger::{
    EntryKind, ExpenseEntry, FiscalSnapshot, FoodCostStatus, LedgerEntry, LedgerSet,
    ManpowerEntry, PurchaseEntry, SalesEntry, VisionCash,
};
pub use menu_item::{CategoryLabel, MenuEngineeringItem};
