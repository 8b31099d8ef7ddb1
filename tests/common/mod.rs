// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use essensplaner::error::Result;
use essensplaner::models::{ParsedIngredient, PreferenceProfile, Recipe};
use essensplaner::state::RecipeStore;

/// In-memory recipe store for integration tests.
#[derive(Default)]
pub struct MemStore {
    pub recipes: Vec<(Recipe, u32)>,
    pub parsed: HashMap<i64, Vec<ParsedIngredient>>,
    pub ratings: HashMap<i64, u8>,
    pub shop_products: Vec<String>,
    pub profile: PreferenceProfile,
}

impl MemStore {
    pub fn add_recipe(&mut self, recipe: Recipe, cook_count: u32) {
        self.recipes.push((recipe, cook_count));
    }

    pub fn add_parsed(&mut self, id: i64, ingredients: Vec<ParsedIngredient>) {
        self.parsed.insert(id, ingredients);
    }
}

impl RecipeStore for MemStore {
    fn favorites(&self) -> Result<Vec<(Recipe, u32)>> {
        let mut favorites = self.recipes.clone();
        favorites.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(favorites)
    }

    fn recipe(&self, id: i64) -> Result<Option<Recipe>> {
        Ok(self
            .recipes
            .iter()
            .find(|(r, _)| r.id == Some(id))
            .map(|(r, _)| r.clone()))
    }

    fn parsed_ingredients(&self, id: i64) -> Result<Vec<ParsedIngredient>> {
        Ok(self.parsed.get(&id).cloned().unwrap_or_default())
    }

    fn ratings(&self) -> Result<HashMap<i64, u8>> {
        Ok(self.ratings.clone())
    }

    fn blacklisted_ids(&self) -> Result<HashSet<i64>> {
        Ok(self
            .ratings
            .iter()
            .filter(|(_, rating)| **rating == 1)
            .map(|(id, _)| *id)
            .collect())
    }

    fn available_ingredients(&self) -> Result<Vec<String>> {
        Ok(self.shop_products.clone())
    }

    fn profile(&self) -> Result<PreferenceProfile> {
        Ok(self.profile.clone())
    }
}

/// A stored recipe with sensible defaults for planning tests.
pub fn recipe(id: i64, title: &str) -> Recipe {
    Recipe {
        id: Some(id),
        title: title.to_string(),
        source_url: None,
        prep_time_minutes: Some(35),
        calories: Some(600),
        servings: Some(4),
        ingredients: vec!["500 g Kartoffeln".to_string(), "Salz".to_string()],
    }
}

/// A parsed ingredient line as the store would hold it.
pub fn parsed(original: &str, amount: Option<f64>, unit: Option<&str>, name: &str) -> ParsedIngredient {
    ParsedIngredient {
        original: original.to_string(),
        amount,
        unit: unit.map(|u| u.to_string()),
        name: name.to_string(),
        base_ingredient: None,
    }
}
