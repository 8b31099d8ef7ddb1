use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ingredients::categorizer::{CachedCategorizer, CategoryEntry};
use crate::models::{ParsedIngredient, PreferenceProfile, Recipe};
use crate::state::store::RecipeStore;

pub const RECIPES_FILE: &str = "recipes.json";
pub const SHOP_CATALOG_FILE: &str = "shop_catalog.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const PROFILE_FILE: &str = "preference_profile.json";

/// One recipe record as persisted in `recipes.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    #[serde(default)]
    pub cook_count: u32,
    /// Star rating 1-5, if the household rated it.
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub parsed_ingredients: Vec<ParsedIngredient>,
}

/// JSON-file implementation of [`RecipeStore`].
///
/// Everything except the recipe file itself is optional: a missing shop
/// catalog, category table or profile degrades to empty defaults.
#[derive(Debug, Clone)]
pub struct LocalStore {
    data_dir: PathBuf,
    recipes: Vec<StoredRecipe>,
}

impl LocalStore {
    /// Load the store from a data directory. A missing recipe file yields
    /// an empty store rather than an error.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let recipes_path = data_dir.join(RECIPES_FILE);

        let recipes = if recipes_path.exists() {
            let content = fs::read_to_string(&recipes_path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };

        Ok(Self { data_dir, recipes })
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }
}

impl RecipeStore for LocalStore {
    fn favorites(&self) -> Result<Vec<(Recipe, u32)>> {
        let mut favorites: Vec<(Recipe, u32)> = self
            .recipes
            .iter()
            .filter(|r| r.recipe.id.is_some() && r.cook_count > 0)
            .map(|r| (r.recipe.clone(), r.cook_count))
            .collect();
        favorites.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(favorites)
    }

    fn recipe(&self, id: i64) -> Result<Option<Recipe>> {
        Ok(self
            .recipes
            .iter()
            .find(|r| r.recipe.id == Some(id))
            .map(|r| r.recipe.clone()))
    }

    fn parsed_ingredients(&self, id: i64) -> Result<Vec<ParsedIngredient>> {
        Ok(self
            .recipes
            .iter()
            .find(|r| r.recipe.id == Some(id))
            .map(|r| r.parsed_ingredients.clone())
            .unwrap_or_default())
    }

    fn ratings(&self) -> Result<HashMap<i64, u8>> {
        Ok(self
            .recipes
            .iter()
            .filter_map(|r| Some((r.recipe.id?, r.rating?)))
            .collect())
    }

    fn blacklisted_ids(&self) -> Result<HashSet<i64>> {
        Ok(self
            .recipes
            .iter()
            .filter(|r| r.rating == Some(1))
            .filter_map(|r| r.recipe.id)
            .collect())
    }

    fn available_ingredients(&self) -> Result<Vec<String>> {
        let path = self.data_dir.join(SHOP_CATALOG_FILE);
        // Catalog lookup failures are never fatal: scoring falls back to
        // seasonality alone.
        let products: Vec<String> = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Ok(products)
    }

    fn profile(&self) -> Result<PreferenceProfile> {
        let path = self.data_dir.join(PROFILE_FILE);
        Ok(fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default())
    }

    /// The categorization table from `categories.json`. Missing or
    /// unreadable file yields an empty table.
    fn categorizer(&self) -> CachedCategorizer {
        let path = self.data_dir.join(CATEGORIES_FILE);
        let cache: HashMap<String, CategoryEntry> = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        CachedCategorizer::new(cache)
    }
}
