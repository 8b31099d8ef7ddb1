use std::collections::HashMap;

use crate::error::Result;
use crate::models::{PreferenceProfile, SlotGroup, SlotKey};

/// Search request for one slot effort group.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub group: SlotGroup,
    /// Most common preferred ingredients for this group, strongest first.
    pub ingredients: Vec<String>,
    /// Preparation time budget in minutes, if the profile has pattern data.
    pub max_time: Option<u32>,
}

/// Candidate recipe returned by the search collaborator, not yet scored.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub prep_time_minutes: Option<u32>,
    pub calories: Option<u32>,
}

/// The recipe discovery collaborator.
///
/// Failures are never fatal to planning: the caller treats an error as
/// zero new candidates and fills slots from favorites only.
pub trait RecipeSearch {
    fn search(&self, query: &SearchQuery, max_results: usize) -> Result<Vec<SearchResult>>;
}

/// The default collaborator: finds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSearch;

impl RecipeSearch for NoSearch {
    fn search(&self, _query: &SearchQuery, _max_results: usize) -> Result<Vec<SearchResult>> {
        Ok(Vec::new())
    }
}

/// Group the given slots by preparation effort, in fixed group order.
pub fn slot_groups(slots: &[SlotKey]) -> Vec<(SlotGroup, Vec<SlotKey>)> {
    [SlotGroup::Quick, SlotGroup::Normal, SlotGroup::Elaborate]
        .into_iter()
        .filter_map(|group| {
            let members: Vec<SlotKey> = slots
                .iter()
                .copied()
                .filter(|key| key.effort_group() == group)
                .collect();
            (!members.is_empty()).then_some((group, members))
        })
        .collect()
}

/// Build one search query per effort group from the profile's per-slot
/// patterns. Groups without any pattern ingredients produce no query.
pub fn build_search_queries(
    groups: &[(SlotGroup, Vec<SlotKey>)],
    profile: &PreferenceProfile,
) -> Vec<SearchQuery> {
    let mut queries = Vec::new();

    for (group, slots) in groups {
        let mut ingredient_counts: HashMap<String, u32> = HashMap::new();
        let mut times: Vec<f64> = Vec::new();

        for key in slots {
            let Some(pattern) = profile.slot_pattern(key.weekday, key.slot) else {
                continue;
            };
            for ing in pattern.top_ingredients.iter().take(5) {
                *ingredient_counts.entry(ing.to_lowercase()).or_default() += 1;
            }
            if let Some(time) = pattern.avg_prep_time_min.filter(|t| *t > 0.0) {
                times.push(time);
            }
        }

        let mut ranked: Vec<(String, u32)> = ingredient_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let top_ingredients: Vec<String> =
            ranked.into_iter().take(5).map(|(name, _)| name).collect();

        let max_time = if times.is_empty() {
            None
        } else {
            Some((times.iter().sum::<f64>() / times.len() as f64) as u32)
        };

        if !top_ingredients.is_empty() {
            queries.push(SearchQuery {
                group: *group,
                ingredients: top_ingredients,
                max_time,
            });
        }
    }

    queries
}
