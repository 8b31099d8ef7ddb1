use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::ingredients::categorizer::CachedCategorizer;
use crate::models::{ParsedIngredient, PreferenceProfile, Recipe};

/// Read access to the household's recipe history and shop catalog.
///
/// The planner only depends on this trait; the CLI wires in
/// [`super::LocalStore`], tests use small in-memory stubs.
pub trait RecipeStore {
    /// Previously cooked recipes with their cook counts, most-cooked first.
    fn favorites(&self) -> Result<Vec<(Recipe, u32)>>;

    fn recipe(&self, id: i64) -> Result<Option<Recipe>>;

    /// Structured ingredients for a stored recipe. Empty when the recipe
    /// has no parsed entries; callers fall back to the raw lines.
    fn parsed_ingredients(&self, id: i64) -> Result<Vec<ParsedIngredient>>;

    /// Star ratings (1-5) keyed by recipe id.
    fn ratings(&self) -> Result<HashMap<i64, u8>>;

    /// Recipe ids rated one star.
    fn blacklisted_ids(&self) -> Result<HashSet<i64>>;

    /// Base ingredients the designated shop currently carries.
    ///
    /// Lookup failures degrade to an empty set so scoring still completes.
    fn available_ingredients(&self) -> Result<Vec<String>>;

    /// The household preference profile; missing data degrades to the
    /// neutral default profile.
    fn profile(&self) -> Result<PreferenceProfile>;

    /// The cached taste-categorization table. Defaults to an empty table,
    /// under which every name is its own category.
    fn categorizer(&self) -> CachedCategorizer {
        CachedCategorizer::default()
    }
}
