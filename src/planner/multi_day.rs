use std::collections::HashSet;

use crate::error::{PlanError, Result};
use crate::models::{MultiDayGroup, ScoredRecipe, SlotKey, WeeklyPlan};

/// Multi-day prep operations on the weekly plan.
///
/// The `multi_day_groups` vector is the single source of truth; each slot's
/// `reuse_from` and `prep_days` are derived views, rebuilt after every
/// mutation. Mutations are all-or-nothing: validation happens before the
/// plan is touched.
impl WeeklyPlan {
    /// Declare that `primary` is cooked once and eaten again on each of
    /// `reuse_slots`. An existing group for the same primary is replaced.
    ///
    /// The reuse slots lose their own candidate lists; their effective
    /// recipe resolves through the primary from now on.
    pub fn set_multi_day(&mut self, primary: SlotKey, reuse_slots: Vec<SlotKey>) -> Result<()> {
        if reuse_slots.is_empty() {
            return Err(PlanError::InvalidInput(
                "Multi-Day-Gruppe braucht mindestens einen Reste-Slot".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for &reuse in &reuse_slots {
            if reuse == primary {
                return Err(PlanError::InvalidInput(format!(
                    "{primary} kann nicht sein eigener Reste-Slot sein"
                )));
            }
            if !seen.insert(reuse) {
                return Err(PlanError::InvalidInput(format!(
                    "Reste-Slot {reuse} mehrfach angegeben"
                )));
            }
            if self.get_slot(reuse).is_none() {
                return Err(PlanError::SlotNotFound(reuse.to_string()));
            }
        }
        if self.get_slot(primary).is_none() {
            return Err(PlanError::SlotNotFound(primary.to_string()));
        }

        // Cross-group consistency: reuse slots are pairwise disjoint and
        // never collide with another group's primary. The group with the
        // same primary is about to be replaced, so it does not count.
        for group in self.multi_day_groups.iter().filter(|g| g.primary != primary) {
            if reuse_slots.contains(&group.primary) {
                return Err(PlanError::InvalidInput(format!(
                    "{} ist bereits Koch-Slot einer anderen Gruppe",
                    group.primary
                )));
            }
            if group.reuse_slots.contains(&primary) {
                return Err(PlanError::InvalidInput(format!(
                    "{primary} ist bereits Reste-Slot von {}",
                    group.primary
                )));
            }
            for &reuse in &reuse_slots {
                if group.reuse_slots.contains(&reuse) {
                    return Err(PlanError::InvalidInput(format!(
                        "{reuse} ist bereits Reste-Slot von {}",
                        group.primary
                    )));
                }
            }
        }

        self.multi_day_groups.retain(|g| g.primary != primary);
        self.multi_day_groups.push(MultiDayGroup {
            primary,
            reuse_slots: reuse_slots.clone(),
        });

        for &reuse in &reuse_slots {
            // Existence checked above.
            let slot = self.get_slot_mut(reuse).unwrap();
            slot.recommendations.clear();
            slot.selected_index = 0;
        }

        self.sync_multi_day_views();
        Ok(())
    }

    /// Dissolve multi-day participation of one slot.
    ///
    /// On a primary slot the whole group is deleted; on a reuse slot only
    /// that entry leaves its group (the group dissolves when it empties).
    pub fn clear_multi_day(&mut self, key: SlotKey) -> Result<()> {
        if self.get_slot(key).is_none() {
            return Err(PlanError::SlotNotFound(key.to_string()));
        }

        if self.multi_day_groups.iter().any(|g| g.primary == key) {
            self.multi_day_groups.retain(|g| g.primary != key);
            self.sync_multi_day_views();
            return Ok(());
        }

        let in_group = self
            .multi_day_groups
            .iter_mut()
            .find(|g| g.reuse_slots.contains(&key));
        match in_group {
            Some(group) => {
                group.reuse_slots.retain(|k| *k != key);
                self.multi_day_groups.retain(|g| !g.reuse_slots.is_empty());
                self.sync_multi_day_views();
                Ok(())
            }
            None => Err(PlanError::InvalidInput(format!(
                "{key} gehört zu keiner Multi-Day-Gruppe"
            ))),
        }
    }

    /// The effective recipe for a slot, following multi-day links.
    pub fn recipe_for_slot(&self, key: SlotKey) -> Option<&ScoredRecipe> {
        let slot = self.get_slot(key)?;
        match slot.reuse_from {
            Some(primary) => self.get_slot(primary)?.selected_recipe(),
            None => slot.selected_recipe(),
        }
    }

    /// The group a slot participates in, as primary or reuse slot.
    pub fn multi_day_group(&self, key: SlotKey) -> Option<&MultiDayGroup> {
        self.multi_day_groups
            .iter()
            .find(|g| g.primary == key || g.reuse_slots.contains(&key))
    }

    /// Rebuild every slot's `reuse_from`/`prep_days` view from the groups.
    pub(crate) fn sync_multi_day_views(&mut self) {
        for slot in &mut self.slots {
            slot.reuse_from = None;
            slot.prep_days = 1;
        }
        let groups = self.multi_day_groups.clone();
        for group in groups {
            if let Some(slot) = self.get_slot_mut(group.primary) {
                slot.prep_days = group.total_days();
            }
            for reuse in group.reuse_slots {
                if let Some(slot) = self.get_slot_mut(reuse) {
                    slot.reuse_from = Some(group.primary);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealSlot, SlotRecommendation, Weekday};
    use chrono::NaiveDate;

    fn plan() -> WeeklyPlan {
        let slots = SlotKey::week()
            .into_iter()
            .map(|key| {
                SlotRecommendation::new(
                    key,
                    vec![ScoredRecipe::custom(
                        format!("Gericht {key}"),
                        format!("https://example.com/{}", key.order()),
                    )],
                )
            })
            .collect();
        WeeklyPlan::new(NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(), slots)
    }

    fn key(weekday: Weekday, slot: MealSlot) -> SlotKey {
        SlotKey::new(weekday, slot)
    }

    #[test]
    fn test_set_multi_day_links_both_directions() {
        let mut plan = plan();
        let primary = key(Weekday::Sonntag, MealSlot::Mittagessen);
        let r1 = key(Weekday::Montag, MealSlot::Mittagessen);
        let r2 = key(Weekday::Dienstag, MealSlot::Mittagessen);

        plan.set_multi_day(primary, vec![r1, r2]).unwrap();

        assert_eq!(plan.get_slot(primary).unwrap().prep_days, 3);
        for reuse in [r1, r2] {
            let slot = plan.get_slot(reuse).unwrap();
            assert_eq!(slot.reuse_from, Some(primary));
            assert!(slot.recommendations.is_empty());
        }
        // The reuse slot resolves through the primary's selection.
        assert_eq!(
            plan.recipe_for_slot(r1).unwrap().title,
            plan.recipe_for_slot(primary).unwrap().title
        );
    }

    #[test]
    fn test_set_multi_day_validation() {
        let mut plan = plan();
        let primary = key(Weekday::Sonntag, MealSlot::Mittagessen);
        let r1 = key(Weekday::Montag, MealSlot::Mittagessen);

        assert!(plan.set_multi_day(primary, vec![]).is_err());
        assert!(plan.set_multi_day(primary, vec![primary]).is_err());
        assert!(plan.set_multi_day(primary, vec![r1, r1]).is_err());

        // Failed mutations leave the plan untouched.
        assert!(plan.multi_day_groups.is_empty());
        assert_eq!(plan.get_slot(primary).unwrap().prep_days, 1);
        assert!(!plan.get_slot(r1).unwrap().recommendations.is_empty());
    }

    #[test]
    fn test_reuse_slots_disjoint_across_groups() {
        let mut plan = plan();
        let p1 = key(Weekday::Sonntag, MealSlot::Mittagessen);
        let p2 = key(Weekday::Mittwoch, MealSlot::Abendessen);
        let shared = key(Weekday::Montag, MealSlot::Mittagessen);

        plan.set_multi_day(p1, vec![shared]).unwrap();
        let err = plan.set_multi_day(p2, vec![shared]).unwrap_err();
        assert!(err.is_validation());

        // A primary cannot be claimed as someone else's reuse slot.
        let err = plan
            .set_multi_day(p2, vec![p1])
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_replacing_group_for_same_primary() {
        let mut plan = plan();
        let primary = key(Weekday::Sonntag, MealSlot::Mittagessen);
        let r1 = key(Weekday::Montag, MealSlot::Mittagessen);
        let r2 = key(Weekday::Dienstag, MealSlot::Mittagessen);

        plan.set_multi_day(primary, vec![r1]).unwrap();
        plan.set_multi_day(primary, vec![r2]).unwrap();

        assert_eq!(plan.multi_day_groups.len(), 1);
        assert_eq!(plan.get_slot(primary).unwrap().prep_days, 2);
        assert_eq!(plan.get_slot(r1).unwrap().reuse_from, None);
        assert_eq!(plan.get_slot(r2).unwrap().reuse_from, Some(primary));
    }

    #[test]
    fn test_clear_on_reuse_slot_shrinks_group() {
        let mut plan = plan();
        let primary = key(Weekday::Sonntag, MealSlot::Mittagessen);
        let r1 = key(Weekday::Montag, MealSlot::Mittagessen);
        let r2 = key(Weekday::Dienstag, MealSlot::Mittagessen);

        plan.set_multi_day(primary, vec![r1, r2]).unwrap();
        plan.clear_multi_day(r1).unwrap();

        assert_eq!(plan.get_slot(primary).unwrap().prep_days, 2);
        assert_eq!(plan.get_slot(r1).unwrap().reuse_from, None);
        assert_eq!(plan.get_slot(r2).unwrap().reuse_from, Some(primary));

        // Clearing the last reuse slot dissolves the group.
        plan.clear_multi_day(r2).unwrap();
        assert!(plan.multi_day_groups.is_empty());
        assert_eq!(plan.get_slot(primary).unwrap().prep_days, 1);
    }

    #[test]
    fn test_clear_on_primary_dissolves_group() {
        let mut plan = plan();
        let primary = key(Weekday::Sonntag, MealSlot::Mittagessen);
        let r1 = key(Weekday::Montag, MealSlot::Mittagessen);
        let r2 = key(Weekday::Dienstag, MealSlot::Mittagessen);

        plan.set_multi_day(primary, vec![r1, r2]).unwrap();
        plan.clear_multi_day(primary).unwrap();

        assert!(plan.multi_day_groups.is_empty());
        assert_eq!(plan.get_slot(primary).unwrap().prep_days, 1);
        assert_eq!(plan.get_slot(r1).unwrap().reuse_from, None);
        assert_eq!(plan.get_slot(r2).unwrap().reuse_from, None);
    }

    #[test]
    fn test_clear_without_group_is_validation_error() {
        let mut plan = plan();
        let standalone = key(Weekday::Freitag, MealSlot::Abendessen);
        let err = plan.clear_multi_day(standalone).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_reuse_slot_excluded_when_primary_skipped() {
        let mut plan = plan();
        let primary = key(Weekday::Sonntag, MealSlot::Mittagessen);
        let r1 = key(Weekday::Montag, MealSlot::Mittagessen);

        plan.set_multi_day(primary, vec![r1]).unwrap();
        plan.select_recipe(primary, -1).unwrap();
        assert!(plan.recipe_for_slot(r1).is_none());
    }
}
