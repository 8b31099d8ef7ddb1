use serde::{Deserialize, Serialize};

/// A structured ingredient line.
///
/// `unit` is drawn from the closed normalized vocabulary (see
/// `ingredients::parser`); two lines aggregate only when their normalized
/// units are identical or both absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// The ingredient line as it appeared in the recipe.
    pub original: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    /// Normalized ingredient name in singular form.
    pub name: String,
    /// Taste-based category assigned by the categorizer, if known.
    #[serde(default)]
    pub base_ingredient: Option<String>,
}

impl ParsedIngredient {
    /// The taste category, falling back to the normalized name itself.
    pub fn category(&self) -> &str {
        self.base_ingredient.as_deref().unwrap_or(&self.name)
    }
}
