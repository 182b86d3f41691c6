use std::collections::HashMap;

use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::engine::constants::FUZZY_MATCH_MIN;
use crate::engine::costing::IngredientOverride;
use crate::error::{MenuError, Result};
use crate::models::RecipeCard;
use crate::state::MenuBook;

/// Recipes whose SKU or name resembles `query`, best first.
///
/// Returns `(sku_id, name, similarity)`; only matches above the fuzzy floor.
pub fn rank_matches(book: &MenuBook, query: &str) -> Vec<(String, String, f64)> {
    let query = query.trim().to_lowercase();

    let mut candidates: Vec<(String, String, f64)> = book
        .recipes()
        .into_iter()
        .map(|r| {
            let score = jaro_winkler(&r.sku_id.to_lowercase(), &query)
                .max(jaro_winkler(&r.name.to_lowercase(), &query));
            (r.sku_id.clone(), r.name.clone(), score)
        })
        .filter(|(_, _, score)| *score > FUZZY_MATCH_MIN)
        .collect();

    candidates.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}

/// Resolve a SKU argument: exact (case-insensitive) SKU or name first, then
/// fuzzy match with confirmation.
pub fn resolve_sku(book: &MenuBook, query: &str) -> Result<String> {
    if let Some(recipe) = book.get(query.trim()) {
        return Ok(recipe.sku_id.clone());
    }

    let lowered = query.trim().to_lowercase();
    if let Some(recipe) = book
        .recipes()
        .into_iter()
        .find(|r| r.name.to_lowercase() == lowered)
    {
        return Ok(recipe.sku_id.clone());
    }

    let candidates = rank_matches(book, query);

    match candidates.len() {
        0 => Err(MenuError::RecipeNotFound(query.to_string())),
        1 => {
            let (sku, name, _) = &candidates[0];
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}' ({})?", name, sku))
                .default(true)
                .interact()?;
            if confirm {
                Ok(sku.clone())
            } else {
                Err(MenuError::RecipeNotFound(query.to_string()))
            }
        }
        _ => {
            let options: Vec<String> = candidates
                .iter()
                .take(5)
                .map(|(sku, name, _)| format!("{} ({})", name, sku))
                .collect();

            let mut selection_options = options.clone();
            selection_options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&selection_options)
                .default(0)
                .interact()?;

            if selection < options.len() {
                Ok(candidates[selection].0.clone())
            } else {
                Err(MenuError::RecipeNotFound(query.to_string()))
            }
        }
    }
}

/// Parse an optional non-negative number; blank means "keep".
fn parse_optional(input: &str, what: &str) -> Result<Option<f64>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let value: f64 = input
        .parse()
        .map_err(|_| MenuError::InvalidInput(format!("Invalid {}: '{}'", what, input)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(MenuError::InvalidInput(format!(
            "{} must be a non-negative number",
            what
        )));
    }
    Ok(Some(value))
}

/// Ask for a hypothetical unit rate and waste percentage per ingredient.
pub fn prompt_overrides(recipe: &RecipeCard) -> Result<HashMap<usize, IngredientOverride>> {
    let mut overrides = HashMap::new();

    println!("Press Enter to keep the current value.");
    for (index, ing) in recipe.ingredients.iter().enumerate() {
        let rate: String = Input::new()
            .with_prompt(format!(
                "{} rate per {} (now {:.2})",
                ing.name,
                if ing.unit.is_empty() { "unit" } else { ing.unit.as_str() },
                ing.cost_per_unit
            ))
            .allow_empty(true)
            .interact_text()?;

        let waste: String = Input::new()
            .with_prompt(format!("{} waste % (now {:.1})", ing.name, ing.waste_pct))
            .allow_empty(true)
            .interact_text()?;

        let over = IngredientOverride {
            new_unit_rate: parse_optional(&rate, "rate")?,
            new_waste_pct: parse_optional(&waste, "waste")?,
        };
        if !over.is_empty() {
            overrides.insert(index, over);
        }
    }

    Ok(overrides)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> MenuBook {
        MenuBook::new(vec![
            RecipeCard::new("PBM-01", "Paneer Butter Masala", vec![], 320.0),
            RecipeCard::new("DAL-02", "Dal Makhani", vec![], 250.0),
            RecipeCard::new("GJ-03", "Gulab Jamun", vec![], 90.0),
        ])
    }

    #[test]
    fn test_rank_matches_by_name() {
        let matches = rank_matches(&book(), "paneer buter masala");
        assert!(!matches.is_empty());
        assert_eq!(matches[0].0, "PBM-01");
    }

    #[test]
    fn test_rank_matches_none() {
        assert!(rank_matches(&book(), "zzzzzz").is_empty());
    }

    #[test]
    fn test_resolve_exact_without_prompt() {
        let book = book();
        assert_eq!(resolve_sku(&book, "dal-02").unwrap(), "DAL-02");
        assert_eq!(resolve_sku(&book, "gulab jamun").unwrap(), "GJ-03");
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional("", "rate").unwrap(), None);
        assert_eq!(parse_optional(" 12.5 ", "rate").unwrap(), Some(12.5));
        assert!(parse_optional("-1", "rate").is_err());
        assert!(parse_optional("abc", "rate").is_err());
    }
}
