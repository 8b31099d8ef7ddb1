use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::plan::{MealSlot, Weekday};

/// Fallback expected preparation time when the profile has no data at all.
pub const DEFAULT_PREP_TIME_MIN: f64 = 45.0;

/// One ranked entry of the household's ingredient preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientPreference {
    pub base_ingredient: String,
    #[serde(default)]
    pub meal_count: u32,
}

/// Observed cooking pattern for one (weekday, slot) cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotPattern {
    #[serde(default)]
    pub avg_prep_time_min: Option<f64>,
    #[serde(default)]
    pub top_ingredients: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverallStats {
    #[serde(default)]
    pub avg_prep_time_min: Option<f64>,
}

/// The household preference profile derived from past meals.
///
/// Every field is serde-defaulted: a missing or empty profile degrades to
/// neutral scores instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceProfile {
    /// Ordered by preference, strongest first.
    #[serde(default)]
    pub ingredient_preferences: Vec<IngredientPreference>,
    /// Keyed by German weekday name, then slot name.
    #[serde(default)]
    pub weekday_patterns: HashMap<String, HashMap<String, SlotPattern>>,
    #[serde(default)]
    pub overall: OverallStats,
}

impl PreferenceProfile {
    /// Lowercased base ingredients of the top `n` preferences.
    pub fn top_base_ingredients(&self, n: usize) -> Vec<String> {
        self.ingredient_preferences
            .iter()
            .take(n)
            .map(|p| p.base_ingredient.to_lowercase())
            .collect()
    }

    pub fn slot_pattern(&self, weekday: Weekday, slot: MealSlot) -> Option<&SlotPattern> {
        self.weekday_patterns
            .get(weekday.name())?
            .get(slot.name())
    }

    /// Expected prep time for a slot, falling back to the overall average
    /// and finally to [`DEFAULT_PREP_TIME_MIN`].
    pub fn expected_prep_time(&self, weekday: Weekday, slot: MealSlot) -> f64 {
        let expected = self
            .slot_pattern(weekday, slot)
            .and_then(|p| p.avg_prep_time_min)
            .or(self.overall.avg_prep_time_min)
            .unwrap_or(DEFAULT_PREP_TIME_MIN);
        if expected == 0.0 {
            DEFAULT_PREP_TIME_MIN
        } else {
            expected
        }
    }
}
