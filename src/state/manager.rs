use std::collections::HashMap;

use crate::engine::config::EngineConfig;
use crate::error::{MenuError, Result};
use crate::models::{MenuEngineeringItem, RecipeCard};

/// In-memory view over recipe cards, keyed by lowercase SKU.
pub struct MenuBook {
    recipes: HashMap<String, RecipeCard>,
}

impl MenuBook {
    /// Create a book from a list of recipe cards. Later duplicates win.
    pub fn new(recipes: Vec<RecipeCard>) -> Self {
        let mut map = HashMap::new();
        for recipe in recipes {
            map.insert(recipe.key(), recipe);
        }
        Self { recipes: map }
    }

    /// Get a recipe by SKU (case-insensitive).
    pub fn get(&self, sku_id: &str) -> Option<&RecipeCard> {
        self.recipes.get(&sku_id.to_lowercase())
    }

    pub fn get_mut(&mut self, sku_id: &str) -> Option<&mut RecipeCard> {
        self.recipes.get_mut(&sku_id.to_lowercase())
    }

    /// All recipes sorted by SKU.
    pub fn recipes(&self) -> Vec<&RecipeCard> {
        let mut recipes: Vec<&RecipeCard> = self.recipes.values().collect();
        recipes.sort_by_key(|r| r.key());
        recipes
    }

    /// A copy of `recipe` with only the ingredient lines that can be costed.
    ///
    /// Returns `None` when the card itself is invalid.
    pub fn costable(recipe: &RecipeCard) -> Option<RecipeCard> {
        if let Err(e) = recipe.validate() {
            tracing::warn!("Skipping recipe {}: {}", recipe.sku_id, e);
            return None;
        }

        let mut clean = recipe.clone();
        clean.ingredients.retain(|ing| match ing.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Skipping ingredient {} on {}: {}", ing.name, recipe.sku_id, e);
                false
            }
        });
        Some(clean)
    }

    /// Score one recipe.
    pub fn item(&self, sku_id: &str, config: &EngineConfig) -> Result<MenuEngineeringItem> {
        let recipe = self
            .get(sku_id)
            .ok_or_else(|| MenuError::RecipeNotFound(sku_id.to_string()))?;
        let clean = Self::costable(recipe).ok_or_else(|| {
            MenuError::InvalidInput(format!("recipe {} cannot be scored", recipe.sku_id))
        })?;
        Ok(MenuEngineeringItem::from_recipe(&clean, config))
    }

    /// Score every valid recipe, sorted by SKU.
    pub fn items(&self, config: &EngineConfig) -> Vec<MenuEngineeringItem> {
        self.recipes()
            .into_iter()
            .filter_map(Self::costable)
            .map(|r| MenuEngineeringItem::from_recipe(&r, config))
            .collect()
    }

    pub fn set_essential(&mut self, sku_id: &str, essential: bool) -> Result<()> {
        let recipe = self
            .get_mut(sku_id)
            .ok_or_else(|| MenuError::RecipeNotFound(sku_id.to_string()))?;
        recipe.is_essential = essential;
        Ok(())
    }

    /// Convert back to a list for serialization, sorted by SKU.
    pub fn to_recipes(&self) -> Vec<RecipeCard> {
        self.recipes().into_iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryLabel, Ingredient};

    fn sample_recipes() -> Vec<RecipeCard> {
        let mut star = RecipeCard::new(
            "B-2",
            "Butter Chicken",
            vec![Ingredient::new("Chicken", 0.2, 300.0, "kg")],
            300.0,
        );
        star.sales_volume = 200;

        let mut broken = RecipeCard::new(
            "A-1",
            "Aloo Tikki",
            vec![
                Ingredient::new("Potato", 0.1, 40.0, "kg"),
                Ingredient::new("Oil", -1.0, 150.0, "l"),
            ],
            80.0,
        );
        broken.sales_volume = 40;

        let mut unpriced = RecipeCard::new("C-3", "Staff Meal", vec![], -5.0);
        unpriced.sales_volume = 10;

        vec![star, broken, unpriced]
    }

    #[test]
    fn test_get_case_insensitive() {
        let book = MenuBook::new(sample_recipes());
        assert!(book.get("b-2").is_some());
        assert!(book.get("B-2").is_some());
        assert!(book.get("Z-9").is_none());
    }

    #[test]
    fn test_items_skip_invalid_cards_and_lines() {
        let book = MenuBook::new(sample_recipes());
        let items = book.items(&EngineConfig::default());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].sku_id, "A-1");
        // Oil line dropped, potato only
        assert!((items[0].food_cost_per_serving() - 4.0).abs() < 1e-9);
        assert_eq!(items[1].sku_id, "B-2");
        assert_eq!(items[1].category_label(), CategoryLabel::Star);
    }

    #[test]
    fn test_item_lookup_errors() {
        let book = MenuBook::new(sample_recipes());
        let config = EngineConfig::default();
        assert!(matches!(
            book.item("nope", &config),
            Err(MenuError::RecipeNotFound(_))
        ));
        assert!(book.item("c-3", &config).is_err());
    }

    #[test]
    fn test_extreme_waste_is_capped_not_dropped() {
        let mut herb = RecipeCard::new(
            "H-1",
            "Herb Plate",
            vec![Ingredient::new("Herb", 2.0, 100.0, "kg").with_waste(150.0)],
            500.0,
        );
        herb.sales_volume = 10;
        let book = MenuBook::new(vec![herb]);

        let item = book.item("h-1", &EngineConfig::default()).unwrap();
        // 200 x 1000 at the 99.9% clamp
        assert!((item.food_cost_per_serving() - 200_000.0).abs() < 1e-3);
        assert_eq!(item.category_label(), CategoryLabel::Dog);
    }

    #[test]
    fn test_set_essential() {
        let mut book = MenuBook::new(sample_recipes());
        book.set_essential("a-1", true).unwrap();
        assert!(book.get("A-1").unwrap().is_essential);
        // Raw card keeps its invalid line for saving
        assert_eq!(book.to_recipes()[0].ingredients.len(), 2);
    }
}
