use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid {kind} entry: {field} = {value}")]
    InvalidEntry {
        kind: &'static str,
        field: &'static str,
        value: f64,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("No {kind} entry at index {index}")]
    EntryNotFound { kind: &'static str, index: usize },

    #[error("No recipes loaded")]
    NoRecipes,
}

pub type Result<T> = std::result::Result<T, MenuError>;

/// Reject a numeric field that is non-finite or negative.
pub(crate) fn check_amount(kind: &'static str, field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MenuError::InvalidEntry { kind, field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_amount() {
        assert!(check_amount("sales", "revenue", 0.0).is_ok());
        assert!(check_amount("sales", "revenue", 12.5).is_ok());
        assert!(check_amount("sales", "revenue", -0.01).is_err());
        assert!(check_amount("sales", "revenue", f64::NAN).is_err());
        assert!(check_amount("sales", "revenue", f64::INFINITY).is_err());
    }

    #[test]
    fn test_invalid_entry_message() {
        let err = check_amount("purchase", "amount", -5.0).unwrap_err();
        assert_eq!(err.to_string(), "Invalid purchase entry: amount = -5");
    }
}
