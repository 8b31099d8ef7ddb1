use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::availability::ShopAvailability;
use crate::error::Result;
use crate::models::{MealSlot, Recipe, ScoredRecipe, SlotKey, Weekday, WeeklyPlan};
use crate::planner::assignment::{assign_recipes_to_slots, count_sources};
use crate::planner::search::{build_search_queries, slot_groups, RecipeSearch};
use crate::scoring::{calculate_score, is_recipe_viable, to_scored_recipe, ScoringContext};
use crate::state::{RecipeStore, UserConfig};

/// Results fetched per search query.
const MAX_RESULTS_PER_QUERY: usize = 20;

/// The Monday following `today` (or `today` itself if it is a Monday).
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let days_ahead = (7 - today.weekday().num_days_from_monday()) % 7;
    today + chrono::Duration::days(days_ahead as i64)
}

/// Score the stored favorites, dropping non-viable ones.
///
/// Often-cooked recipes get a small boost on top of the context score,
/// capped so a workhorse recipe cannot dominate on repetition alone.
fn score_favorites(
    favorites: &[(Recipe, u32)],
    context: &ScoringContext<'_>,
) -> Vec<ScoredRecipe> {
    let mut scored: Vec<ScoredRecipe> = favorites
        .iter()
        .filter(|(recipe, _)| is_recipe_viable(recipe, context).0)
        .map(|(recipe, cook_count)| {
            let breakdown = calculate_score(recipe, context);
            let mut entry = to_scored_recipe(recipe, &breakdown);
            let cook_bonus = (*cook_count as f64 * 2.0).min(10.0);
            entry.score = (breakdown.total + cook_bonus).min(100.0);
            entry
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Run the search collaborator and score its candidates.
///
/// Search failures degrade to zero candidates for that query; candidate
/// ingredient lists are unknown at this point, so scoring works from
/// title, prep time and profile data alone.
fn find_new_recipes(
    search: &dyn RecipeSearch,
    queries: &[crate::planner::search::SearchQuery],
    context: &ScoringContext<'_>,
) -> Vec<ScoredRecipe> {
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut scored: Vec<ScoredRecipe> = Vec::new();

    for query in queries {
        let results = match search.search(query, MAX_RESULTS_PER_QUERY) {
            Ok(results) => results,
            Err(err) => {
                eprintln!("Suche fehlgeschlagen ({:?}): {err}", query.group);
                continue;
            }
        };

        for result in results {
            if !seen_urls.insert(result.url.clone()) {
                continue;
            }
            let candidate = Recipe {
                id: None,
                title: result.title,
                source_url: Some(result.url),
                prep_time_minutes: result.prep_time_minutes,
                calories: result.calories,
                servings: None,
                ingredients: Vec::new(),
            };
            if !is_recipe_viable(&candidate, context).0 {
                continue;
            }
            let breakdown = calculate_score(&candidate, context);
            scored.push(to_scored_recipe(&candidate, &breakdown));
        }
    }

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Generate a fresh weekly plan for all 14 slots.
///
/// Collaborator failures (shop catalog, search) degrade per their
/// documented defaults; standing multi-day preferences and skipped slots
/// from the config are applied to the finished plan.
pub fn generate_weekly_plan(
    store: &dyn RecipeStore,
    search: &dyn RecipeSearch,
    config: &UserConfig,
    week_start: NaiveDate,
    month: u32,
) -> Result<WeeklyPlan> {
    let profile = store.profile()?;
    let shop = ShopAvailability::new(store.available_ingredients().unwrap_or_default());
    let categorizer = store.categorizer();
    let ratings = store.ratings()?;
    let blacklisted = store.blacklisted_ids()?;
    let favorites_raw = store.favorites()?;
    let cook_counts = favorites_raw
        .iter()
        .filter_map(|(recipe, count)| Some((recipe.id?, *count)))
        .collect();

    let context = ScoringContext {
        weekday: Weekday::Montag,
        slot: MealSlot::Abendessen,
        profile: &profile,
        shop: &shop,
        month,
        ratings: &ratings,
        blacklisted: &blacklisted,
        cook_counts: &cook_counts,
        categorizer: &categorizer,
    };

    let favorites = score_favorites(&favorites_raw, &context);

    let slots = SlotKey::week();
    let queries = build_search_queries(&slot_groups(&slots), &profile);
    let new_recipes = find_new_recipes(search, &queries, &context);

    let recommendations = assign_recipes_to_slots(&slots, &favorites, &new_recipes);
    let (favorites_count, new_count) = count_sources(&recommendations);

    let mut plan = WeeklyPlan::new(week_start, recommendations);
    plan.favorites_count = favorites_count;
    plan.new_count = new_count;

    for group in &config.multi_day_preferences {
        if let Err(err) = plan.set_multi_day(group.primary, group.reuse_slots.clone()) {
            eprintln!("Multi-Day-Voreinstellung für {} übersprungen: {err}", group.primary);
        }
    }
    for &key in &config.skipped_slots {
        if plan.get_slot(key).is_some_and(|slot| !slot.is_reuse_slot()) {
            // Existence and non-reuse checked, so this cannot fail.
            plan.select_recipe(key, -1)?;
        }
    }

    Ok(plan)
}
