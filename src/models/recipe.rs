use std::fmt;

use serde::{Deserialize, Serialize};

/// A recipe as it lives in the store or comes back from a search.
///
/// Recipes without an `id` are "new": found via search, not yet persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Recipe {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

/// A recipe summary with its score for one planning run.
///
/// Produced fresh per scoring context and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRecipe {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    pub score: f64,
    #[serde(default)]
    pub reasoning: String,
    /// True for recipes discovered via search, false for stored favorites.
    pub is_new: bool,
    #[serde(default)]
    pub recipe_id: Option<i64>,
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Manually added by the user instead of scored by the planner.
    #[serde(default)]
    pub is_custom: bool,
}

impl ScoredRecipe {
    /// An unscored, user-supplied candidate identified by its URL.
    pub fn custom(title: String, url: String) -> Self {
        Self {
            title,
            url: Some(url),
            score: 0.0,
            reasoning: "Manuell hinzugefügt".to_string(),
            is_new: true,
            recipe_id: None,
            prep_time_minutes: None,
            calories: None,
            servings: None,
            ingredients: Vec::new(),
            is_custom: true,
        }
    }

    /// Identity used to avoid duplicate candidates: store id for favorites,
    /// URL for new recipes.
    pub fn same_recipe(&self, other: &ScoredRecipe) -> bool {
        match (self.recipe_id, other.recipe_id) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.url.is_some() && self.url == other.url,
            _ => false,
        }
    }
}

impl fmt::Display for ScoredRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = if self.is_new { "NEU" } else { "FAV" };
        match self.prep_time_minutes {
            Some(min) => write!(f, "[{source}] {} ({:.0}pt, {min}min)", self.title, self.score),
            None => write!(f, "[{source}] {} ({:.0}pt)", self.title, self.score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_recipe_identity() {
        let fav = ScoredRecipe {
            recipe_id: Some(1),
            is_new: false,
            is_custom: false,
            ..ScoredRecipe::custom("Linsensuppe".into(), "https://a".into())
        };
        let fav_again = ScoredRecipe {
            url: Some("https://other".into()),
            ..fav.clone()
        };
        assert!(fav.same_recipe(&fav_again));

        let new_a = ScoredRecipe::custom("Curry".into(), "https://a".into());
        let new_b = ScoredRecipe::custom("Curry 2".into(), "https://a".into());
        assert!(new_a.same_recipe(&new_b));
        assert!(!fav.same_recipe(&new_a));
    }

    #[test]
    fn test_display_tags_source() {
        let custom = ScoredRecipe::custom("Pizza".into(), "https://p".into());
        assert!(custom.to_string().starts_with("[NEU]"));
    }
}
