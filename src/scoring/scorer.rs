use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::availability::seasonality::{out_of_season_ingredients, season_score};
use crate::availability::ShopAvailability;
use crate::ingredients::categorizer::CachedCategorizer;
use crate::ingredients::parser::parse_ingredient;
use crate::models::{MealSlot, PreferenceProfile, Recipe, ScoredRecipe, Weekday};

/// Scoring weights. Ingredient affinity dominates, availability and
/// seasonality nudge.
pub const WEIGHT_INGREDIENT_AFFINITY: f64 = 0.40;
pub const WEIGHT_TIME_COMPATIBILITY: f64 = 0.25;
pub const WEIGHT_SHOP_AVAILABILITY: f64 = 0.20;
pub const WEIGHT_SEASONALITY: f64 = 0.15;

/// Recipes below this ratio of obtainable ingredients are filtered out.
pub const MIN_OBTAINABLE_RATIO: f64 = 0.5;

/// Star-rating multipliers applied to the weighted total.
/// One star means blacklisted; that case is filtered in [`is_recipe_viable`].
pub fn rating_multiplier(rating: u8) -> f64 {
    match rating {
        1 => 0.0,
        2 => 0.85,
        3 => 1.00,
        4 => 1.10,
        5 => 1.20,
        _ => 1.00,
    }
}

/// Title keyword variations used to detect key ingredients.
static KEY_INGREDIENT_VARIATIONS: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| {
        let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        m.insert("spargel", &["spargel"]);
        m.insert("tomate", &["tomate", "tomaten"]);
        m.insert("kartoffel", &["kartoffel", "kartoffeln"]);
        m.insert("kürbis", &["kürbis", "hokkaido", "butternut"]);
        m.insert("erdbeere", &["erdbeere", "erdbeer"]);
        m.insert("pilz", &["pilz", "pilze", "champignon", "pfifferling"]);
        m.insert("lachs", &["lachs"]);
        m.insert("hähnchen", &["hähnchen", "huhn", "hühnchen", "chicken"]);
        m.insert("rind", &["rind", "beef", "steak"]);
        m.insert("schwein", &["schwein", "pork", "schnitzel"]);
        m
    });

/// Everything needed to score recipes for one (weekday, slot) cell.
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    pub weekday: Weekday,
    pub slot: MealSlot,
    pub profile: &'a PreferenceProfile,
    pub shop: &'a ShopAvailability,
    /// Month used for seasonality checks, 1-12.
    pub month: u32,
    /// Star ratings (1-5) keyed by recipe id.
    pub ratings: &'a HashMap<i64, u8>,
    /// Recipe ids rated one star.
    pub blacklisted: &'a HashSet<i64>,
    /// How often each stored recipe has been cooked.
    pub cook_counts: &'a HashMap<i64, u32>,
    /// Taste-category table mapping parsed names to base ingredients.
    pub categorizer: &'a CachedCategorizer,
}

/// Component scores of one recipe, all on a 0-100 scale.
#[derive(Debug, Clone, Default)]
pub struct ScoreBreakdown {
    pub total: f64,
    pub ingredient_affinity: f64,
    pub time_compatibility: f64,
    pub shop_availability: f64,
    pub seasonality: f64,
    pub reasoning: String,
    pub matched_favorites: Vec<String>,
    pub available_at_shop: Vec<String>,
    pub out_of_season: Vec<String>,
    pub rating_multiplier: f64,
    pub user_rating: Option<u8>,
    pub cook_count: Option<u32>,
}

/// Map a recipe's raw ingredient lines to base ingredient names.
///
/// Each line is parsed, run through the taste categorizer (a miss keeps the
/// normalized name), then matched against the known profile preferences
/// (substring, either direction); a preference match takes the preference's
/// base form.
pub fn recipe_base_ingredients(
    recipe: &Recipe,
    profile: &PreferenceProfile,
    categorizer: &CachedCategorizer,
) -> Vec<String> {
    let known: Vec<String> = profile
        .ingredient_preferences
        .iter()
        .map(|p| p.base_ingredient.to_lowercase())
        .collect();

    recipe
        .ingredients
        .iter()
        .filter_map(|line| {
            let parsed = parse_ingredient(line);
            if parsed.name.is_empty() {
                return None;
            }
            let name = categorizer.category_or_self(&parsed.name);
            let matched = known
                .iter()
                .find(|k| name.contains(k.as_str()) || k.contains(&name));
            Some(matched.cloned().unwrap_or(name))
        })
        .collect()
}

/// Affinity with the household's top-30 preferred ingredients, 0-100.
fn ingredient_affinity(
    base_ingredients: &[String],
    profile: &PreferenceProfile,
) -> (f64, Vec<String>) {
    if base_ingredients.is_empty() {
        return (50.0, Vec::new());
    }
    let favorites = profile.top_base_ingredients(30);
    if favorites.is_empty() {
        return (50.0, Vec::new());
    }

    let ranks: HashMap<&str, usize> = favorites
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut matched = Vec::new();
    let mut total = 0.0;
    for ing in base_ingredients {
        if let Some(&rank) = ranks.get(ing.as_str()) {
            // Rank 0 scores 100, rank 29 scores ~3.
            total += 100.0 * (1.0 - rank as f64 / 30.0);
            matched.push(ing.clone());
        }
    }

    if matched.is_empty() {
        return (30.0, Vec::new());
    }

    let avg = total / matched.len() as f64;
    let match_bonus = (matched.len() as f64 * 5.0).min(20.0);
    ((avg + match_bonus).min(100.0), matched)
}

/// How well the prep time fits the slot's usual pattern, 0-100.
///
/// Triangular falloff around the expected time: within 20% deviation is a
/// perfect fit, 100% deviation scores ~10.
fn time_compatibility(prep_time_minutes: Option<u32>, context: &ScoringContext<'_>) -> f64 {
    let Some(prep) = prep_time_minutes else {
        return 50.0;
    };
    let expected = context.profile.expected_prep_time(context.weekday, context.slot);

    let deviation = (prep as f64 - expected).abs() / expected;
    if deviation <= 0.2 {
        100.0
    } else if deviation <= 0.5 {
        100.0 - (deviation - 0.2) * 166.0
    } else if deviation <= 1.0 {
        50.0 - (deviation - 0.5) * 80.0
    } else {
        (10.0 - (deviation - 1.0) * 10.0).max(0.0)
    }
}

/// Share of ingredients the shop carries, 0-100.
fn shop_availability(
    base_ingredients: &[String],
    shop: &ShopAvailability,
) -> (f64, Vec<String>) {
    if base_ingredients.is_empty() {
        return (50.0, Vec::new());
    }
    let available: Vec<String> = base_ingredients
        .iter()
        .filter(|i| shop.matches(i))
        .cloned()
        .collect();
    (shop.match_ratio(base_ingredients) * 100.0, available)
}

/// Share of ingredients in season (or without calendar data), 0-100.
fn seasonality(base_ingredients: &[String], month: u32) -> (f64, Vec<String>) {
    (
        season_score(base_ingredients, month) * 100.0,
        out_of_season_ingredients(base_ingredients, month),
    )
}

/// Whether the ingredient is a main ingredient of the recipe, judged by its
/// appearance in the title (directly or via common German variations).
fn is_key_ingredient(ingredient: &str, title: &str) -> bool {
    let ing = ingredient.to_lowercase();
    let title = title.to_lowercase();

    if title.contains(&ing) {
        return true;
    }

    for (base, variations) in KEY_INGREDIENT_VARIATIONS.iter() {
        let ingredient_is_base = ing == *base || variations.iter().any(|v| ing.contains(v));
        if ingredient_is_base && variations.iter().any(|v| title.contains(v)) {
            return true;
        }
    }

    false
}

/// Ingredients that are neither at the shop nor in season.
pub fn unobtainable_ingredients(
    base_ingredients: &[String],
    shop: &ShopAvailability,
    month: u32,
) -> Vec<String> {
    base_ingredients
        .iter()
        .filter(|i| !shop.is_obtainable(i, month))
        .cloned()
        .collect()
}

/// Check whether a recipe can realistically be cooked this week.
///
/// Viable means: not blacklisted, no key ingredient (one named in the
/// title) unobtainable, and at least [`MIN_OBTAINABLE_RATIO`] of all
/// ingredients obtainable.
///
/// Returns (viable, unobtainable ingredients, obtainable ratio).
pub fn is_recipe_viable(
    recipe: &Recipe,
    context: &ScoringContext<'_>,
) -> (bool, Vec<String>, f64) {
    if let Some(id) = recipe.id {
        if context.blacklisted.contains(&id) {
            return (false, vec!["Vom User ausgeschlossen (1 Stern)".to_string()], 0.0);
        }
    }

    let base_ingredients = recipe_base_ingredients(recipe, context.profile, context.categorizer);
    if base_ingredients.is_empty() {
        return (true, Vec::new(), 1.0);
    }

    let unobtainable = unobtainable_ingredients(&base_ingredients, context.shop, context.month);
    let obtainable_ratio =
        (base_ingredients.len() - unobtainable.len()) as f64 / base_ingredients.len() as f64;

    let key_missing = unobtainable
        .iter()
        .any(|ing| is_key_ingredient(ing, &recipe.title));

    let viable = !key_missing && obtainable_ratio >= MIN_OBTAINABLE_RATIO;
    (viable, unobtainable, obtainable_ratio)
}

/// Build the German explanation string for a score.
pub fn generate_reasoning(score: &ScoreBreakdown) -> String {
    let mut reasons: Vec<String> = Vec::new();

    if let Some(rating) = score.user_rating {
        if rating >= 4 {
            reasons.push(format!("Favorit ({rating} Sterne)"));
        } else if rating == 2 {
            reasons.push("Weniger bevorzugt (2 Sterne)".to_string());
        }
    }

    if score.ingredient_affinity >= 80.0 {
        let top: Vec<&str> = score
            .matched_favorites
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        reasons.push(format!("Enthält Lieblingszutaten ({})", top.join(", ")));
    } else if score.ingredient_affinity >= 50.0 {
        if !score.matched_favorites.is_empty() {
            reasons.push("Enthält einige bevorzugte Zutaten".to_string());
        }
    } else {
        reasons.push("Wenige Lieblingszutaten".to_string());
    }

    if score.time_compatibility >= 80.0 {
        reasons.push("Zubereitungszeit passt perfekt zum Slot".to_string());
    } else if score.time_compatibility >= 50.0 {
        reasons.push("Zubereitungszeit ist akzeptabel".to_string());
    } else if score.time_compatibility < 30.0 {
        reasons.push("Zubereitungszeit passt nicht gut zum Slot".to_string());
    }

    if score.shop_availability >= 80.0 {
        reasons.push("Viele Zutaten im Hofladen verfügbar".to_string());
    } else if score.shop_availability >= 50.0 {
        reasons.push("Einige Zutaten im Hofladen verfügbar".to_string());
    } else if score.shop_availability < 30.0 {
        reasons.push("Wenige Zutaten im Hofladen verfügbar".to_string());
    }

    if score.seasonality >= 90.0 {
        reasons.push("Alle Zutaten saisonal".to_string());
    } else if score.seasonality >= 70.0 {
        reasons.push("Überwiegend saisonal".to_string());
    } else if !score.out_of_season.is_empty() {
        let top: Vec<&str> = score
            .out_of_season
            .iter()
            .take(2)
            .map(String::as_str)
            .collect();
        reasons.push(format!("Nicht saisonal: {}", top.join(", ")));
    }

    if let Some(count) = score.cook_count.filter(|c| *c > 0) {
        reasons.push(format!("Bereits {count}x gekocht"));
    }

    if reasons.is_empty() {
        "Keine besonderen Merkmale.".to_string()
    } else {
        format!("{}.", reasons.join(". "))
    }
}

/// Score a recipe for the context's slot. The total is clamped to [0, 100].
pub fn calculate_score(recipe: &Recipe, context: &ScoringContext<'_>) -> ScoreBreakdown {
    let base_ingredients = recipe_base_ingredients(recipe, context.profile, context.categorizer);

    let (affinity, matched_favorites) = ingredient_affinity(&base_ingredients, context.profile);
    let time = time_compatibility(recipe.prep_time_minutes, context);
    let (shop, available_at_shop) = shop_availability(&base_ingredients, context.shop);
    let (season, out_of_season) = seasonality(&base_ingredients, context.month);

    let mut total = affinity * WEIGHT_INGREDIENT_AFFINITY
        + time * WEIGHT_TIME_COMPATIBILITY
        + shop * WEIGHT_SHOP_AVAILABILITY
        + season * WEIGHT_SEASONALITY;

    let mut user_rating = None;
    let mut multiplier = 1.0;
    let mut cook_count = None;
    if let Some(id) = recipe.id {
        if let Some(&rating) = context.ratings.get(&id) {
            user_rating = Some(rating);
            multiplier = rating_multiplier(rating);
            total *= multiplier;
        }
        cook_count = context.cook_counts.get(&id).copied();
    }

    let mut score = ScoreBreakdown {
        total: (total * 10.0).round() / 10.0,
        ingredient_affinity: (affinity * 10.0).round() / 10.0,
        time_compatibility: (time * 10.0).round() / 10.0,
        shop_availability: (shop * 10.0).round() / 10.0,
        seasonality: (season * 10.0).round() / 10.0,
        reasoning: String::new(),
        matched_favorites,
        available_at_shop,
        out_of_season,
        rating_multiplier: multiplier,
        user_rating,
        cook_count,
    };
    score.total = score.total.clamp(0.0, 100.0);
    score.reasoning = generate_reasoning(&score);
    score
}

/// Score and filter a recipe list, best first. Non-viable recipes are
/// dropped.
pub fn score_recipes(
    recipes: &[Recipe],
    context: &ScoringContext<'_>,
) -> Vec<(Recipe, ScoreBreakdown)> {
    let mut scored: Vec<(Recipe, ScoreBreakdown)> = recipes
        .iter()
        .filter(|recipe| is_recipe_viable(recipe, context).0)
        .map(|recipe| (recipe.clone(), calculate_score(recipe, context)))
        .collect();
    scored.sort_by(|a, b| b.1.total.total_cmp(&a.1.total));
    scored
}

/// Fold a recipe and its score into the candidate form stored in the plan.
pub fn to_scored_recipe(recipe: &Recipe, score: &ScoreBreakdown) -> ScoredRecipe {
    ScoredRecipe {
        title: recipe.title.clone(),
        url: recipe.source_url.clone(),
        score: score.total,
        reasoning: score.reasoning.clone(),
        is_new: recipe.is_new(),
        recipe_id: recipe.id,
        prep_time_minutes: recipe.prep_time_minutes,
        calories: recipe.calories,
        servings: recipe.servings,
        ingredients: recipe.ingredients.clone(),
        is_custom: false,
    }
}
