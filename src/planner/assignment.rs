use std::collections::HashSet;

use crate::models::{ScoredRecipe, SlotKey, SlotRecommendation};

/// Target share of slots whose top candidate is a stored favorite.
pub const TARGET_FAVORITES_RATIO: f64 = 0.6;

/// Maximum candidates per slot.
pub const RECOMMENDATIONS_PER_SLOT: usize = 5;

/// Fill the given slots with ranked candidate lists.
///
/// Both input lists must already be scored, viable and sorted descending by
/// score. Two passes: favorites first until `round(slots × 0.6)` top picks
/// are placed (unique by recipe id), then new recipes (unique by URL) for
/// the rest, backfilled with favorites when new recipes run short.
/// Favorites may reappear in later slots' alternative lists; only top picks
/// are unique.
pub fn assign_recipes_to_slots(
    slots: &[SlotKey],
    favorites: &[ScoredRecipe],
    new_recipes: &[ScoredRecipe],
) -> Vec<SlotRecommendation> {
    let target_favorites = (slots.len() as f64 * TARGET_FAVORITES_RATIO).round() as usize;

    let mut used_favorite_ids: HashSet<i64> = HashSet::new();
    let mut used_new_urls: HashSet<String> = HashSet::new();
    let mut recommendations: Vec<SlotRecommendation> = Vec::with_capacity(slots.len());

    // First pass: favorites as top picks.
    for &key in slots {
        if recommendations.len() >= target_favorites {
            break;
        }
        let Some(best) = favorites.iter().find(|fav| {
            fav.recipe_id
                .is_some_and(|id| !used_favorite_ids.contains(&id))
        }) else {
            break;
        };
        let best_id = best.recipe_id.unwrap_or_default();
        used_favorite_ids.insert(best_id);

        let mut candidates = vec![best.clone()];
        for fav in favorites {
            if candidates.len() >= RECOMMENDATIONS_PER_SLOT {
                break;
            }
            let available = fav
                .recipe_id
                .is_some_and(|id| !used_favorite_ids.contains(&id) || id == best_id);
            if available && !candidates.iter().any(|c| c.same_recipe(fav)) {
                candidates.push(fav.clone());
            }
        }

        recommendations.push(SlotRecommendation::new(key, candidates));
    }

    // Second pass: new recipes for the remaining slots.
    let assigned: HashSet<SlotKey> = recommendations.iter().map(|r| r.key()).collect();
    for &key in slots {
        if assigned.contains(&key) {
            continue;
        }

        let mut candidates: Vec<ScoredRecipe> = Vec::new();
        for new in new_recipes {
            if candidates.len() >= RECOMMENDATIONS_PER_SLOT {
                break;
            }
            let Some(url) = new.url.as_deref() else {
                continue;
            };
            if used_new_urls.contains(url) {
                continue;
            }
            candidates.push(new.clone());
            if candidates.len() == 1 {
                // Only the top pick is reserved; alternatives may reappear.
                used_new_urls.insert(url.to_string());
            }
        }

        if candidates.len() < RECOMMENDATIONS_PER_SLOT {
            for fav in favorites {
                if candidates.len() >= RECOMMENDATIONS_PER_SLOT {
                    break;
                }
                if !candidates.iter().any(|c| c.same_recipe(fav)) {
                    candidates.push(fav.clone());
                }
            }
        }

        recommendations.push(SlotRecommendation::new(key, candidates));
    }

    recommendations.sort_by_key(|r| r.key().order());
    recommendations
}

/// How many top picks came from each pool: (favorites, new).
pub fn count_sources(recommendations: &[SlotRecommendation]) -> (u32, u32) {
    let favorites = recommendations
        .iter()
        .filter(|r| r.top_recipe().is_some_and(|top| !top.is_new))
        .count() as u32;
    (favorites, recommendations.len() as u32 - favorites)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn favorite(id: i64, score: f64) -> ScoredRecipe {
        ScoredRecipe {
            recipe_id: Some(id),
            is_new: false,
            score,
            url: None,
            is_custom: false,
            ..ScoredRecipe::custom(format!("Favorit {id}"), String::new())
        }
    }

    fn new_recipe(n: usize, score: f64) -> ScoredRecipe {
        ScoredRecipe {
            score,
            ..ScoredRecipe::custom(format!("Neu {n}"), format!("https://example.com/{n}"))
        }
    }

    fn favorites(n: usize) -> Vec<ScoredRecipe> {
        (0..n).map(|i| favorite(i as i64 + 1, 90.0 - i as f64)).collect()
    }

    fn new_recipes(n: usize) -> Vec<ScoredRecipe> {
        (0..n).map(|i| new_recipe(i, 80.0 - i as f64)).collect()
    }

    #[test]
    fn test_target_ratio_with_full_pools() {
        let slots = SlotKey::week();
        let recs = assign_recipes_to_slots(&slots, &favorites(20), &new_recipes(20));
        assert_eq!(recs.len(), 14);

        let (fav_count, new_count) = count_sources(&recs);
        assert_eq!(fav_count, 8);
        assert_eq!(new_count, 6);

        // Canonical order.
        for (i, rec) in recs.iter().enumerate() {
            assert_eq!(rec.key().order(), i);
        }
    }

    #[test]
    fn test_top_picks_are_unique() {
        let slots = SlotKey::week();
        let recs = assign_recipes_to_slots(&slots, &favorites(20), &new_recipes(20));

        let mut top_ids = HashSet::new();
        let mut top_urls = HashSet::new();
        for rec in &recs {
            let top = rec.top_recipe().unwrap();
            if top.is_new {
                assert!(top_urls.insert(top.url.clone().unwrap()));
            } else {
                assert!(top_ids.insert(top.recipe_id.unwrap()));
            }
        }
    }

    #[test]
    fn test_no_new_recipes_fills_with_favorites() {
        let slots = SlotKey::week();
        let recs = assign_recipes_to_slots(&slots, &favorites(20), &[]);
        assert_eq!(recs.len(), 14);

        // The first 8 slots get unique favorite tops; the rest backfill
        // from the favorites pool.
        let (fav_count, new_count) = count_sources(&recs);
        assert_eq!(fav_count + new_count, 14);
        assert!(recs.iter().all(|r| !r.recommendations.is_empty()));
    }

    #[test]
    fn test_no_favorites_at_all() {
        let slots = SlotKey::week();
        let recs = assign_recipes_to_slots(&slots, &[], &new_recipes(20));
        let (fav_count, new_count) = count_sources(&recs);
        assert_eq!(fav_count, 0);
        assert_eq!(new_count, 14);
    }

    #[test]
    fn test_candidate_lists_capped_at_five() {
        let slots = SlotKey::week();
        let recs = assign_recipes_to_slots(&slots, &favorites(30), &new_recipes(30));
        assert!(recs
            .iter()
            .all(|r| r.recommendations.len() <= RECOMMENDATIONS_PER_SLOT));
    }

    #[test]
    fn test_scarce_favorites_break_early() {
        let slots = SlotKey::week();
        // Only 3 favorites: pass one stops after 3 top picks.
        let recs = assign_recipes_to_slots(&slots, &favorites(3), &new_recipes(20));
        let (fav_count, new_count) = count_sources(&recs);
        assert_eq!(fav_count, 3);
        assert_eq!(new_count, 11);
    }
}
