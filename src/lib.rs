pub mod cli;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;
pub mod sweep;

pub use engine::EngineConfig;
pub use error::{MenuError, Result};
pub use models::{CategoryLabel, FiscalSnapshot, Ingredient, MenuEngineeringItem, RecipeCard};
