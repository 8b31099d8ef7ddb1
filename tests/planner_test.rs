mod common;

use chrono::NaiveDate;
use common::{recipe, MemStore};
use essensplaner::error::Result;
use essensplaner::planner::{generate_weekly_plan, NoSearch, RecipeSearch, SearchQuery, SearchResult};
use essensplaner::state::UserConfig;

struct StubSearch {
    results: Vec<SearchResult>,
}

impl RecipeSearch for StubSearch {
    fn search(&self, _query: &SearchQuery, max_results: usize) -> Result<Vec<SearchResult>> {
        Ok(self.results.iter().take(max_results).cloned().collect())
    }
}

fn week_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
}

fn store_with_favorites(count: usize) -> MemStore {
    let mut store = MemStore::default();
    for i in 0..count {
        store.add_recipe(recipe(i as i64 + 1, &format!("Gericht {i}")), (count - i) as u32);
    }
    store
}

fn search_profile() -> essensplaner::models::PreferenceProfile {
    // A pattern-bearing profile so search queries get built.
    let mut profile = essensplaner::models::PreferenceProfile::default();
    let mut monday = std::collections::HashMap::new();
    monday.insert(
        "Abendessen".to_string(),
        essensplaner::models::profile::SlotPattern {
            avg_prep_time_min: Some(35.0),
            top_ingredients: vec!["kartoffel".to_string()],
        },
    );
    profile.weekday_patterns.insert("Montag".to_string(), monday);
    profile
}

#[test]
fn counters_always_cover_all_slots() {
    let store = store_with_favorites(20);
    let plan =
        generate_weekly_plan(&store, &NoSearch, &UserConfig::default(), week_start(), 6).unwrap();

    assert_eq!(plan.slots.len(), 14);
    assert_eq!(plan.favorites_count + plan.new_count, 14);
}

#[test]
fn favorites_ratio_near_target_with_both_pools() {
    let mut store = store_with_favorites(20);
    store.profile = search_profile();

    let search = StubSearch {
        results: (0..20)
            .map(|i| SearchResult {
                title: format!("Neues Gericht {i}"),
                url: format!("https://example.com/neu/{i}"),
                prep_time_minutes: Some(30),
                calories: None,
            })
            .collect(),
    };

    let plan =
        generate_weekly_plan(&store, &search, &UserConfig::default(), week_start(), 6).unwrap();

    // Target is round(14 * 0.6) = 8 favorite top picks.
    assert_eq!(plan.favorites_count, 8);
    assert_eq!(plan.new_count, 6);
    assert!((plan.favorites_ratio() - 0.6).abs() <= 1.0 / 14.0);
}

#[test]
fn one_star_recipes_never_appear_as_candidates() {
    let mut store = store_with_favorites(20);
    store.ratings.insert(3, 1);

    let plan =
        generate_weekly_plan(&store, &NoSearch, &UserConfig::default(), week_start(), 6).unwrap();

    for slot in &plan.slots {
        for candidate in &slot.recommendations {
            assert_ne!(candidate.recipe_id, Some(3), "blacklisted recipe in {}", slot.key());
        }
    }
}

#[test]
fn failing_search_degrades_to_favorites_only() {
    struct FailingSearch;
    impl RecipeSearch for FailingSearch {
        fn search(&self, _query: &SearchQuery, _max: usize) -> Result<Vec<SearchResult>> {
            Err(essensplaner::PlanError::InvalidInput("offline".to_string()))
        }
    }

    let mut store = store_with_favorites(20);
    store.profile = search_profile();

    let plan = generate_weekly_plan(
        &store,
        &FailingSearch,
        &UserConfig::default(),
        week_start(),
        6,
    )
    .unwrap();

    assert_eq!(plan.slots.len(), 14);
    assert_eq!(plan.favorites_count, 14);
    assert_eq!(plan.new_count, 0);
}

#[test]
fn plan_survives_json_roundtrip() {
    let store = store_with_favorites(20);
    let plan =
        generate_weekly_plan(&store, &NoSearch, &UserConfig::default(), week_start(), 6).unwrap();

    let json = serde_json::to_string_pretty(&plan).unwrap();
    let reloaded: essensplaner::WeeklyPlan = serde_json::from_str(&json).unwrap();

    assert_eq!(reloaded.week_start, plan.week_start);
    assert_eq!(reloaded.favorites_count, plan.favorites_count);
    assert_eq!(reloaded.slots.len(), plan.slots.len());
    for (a, b) in plan.slots.iter().zip(reloaded.slots.iter()) {
        assert_eq!(a.key(), b.key());
        assert_eq!(a.selected_index, b.selected_index);
        assert_eq!(a.recommendations.len(), b.recommendations.len());
    }
}
