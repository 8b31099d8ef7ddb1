use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::PlanError;
use crate::models::recipe::ScoredRecipe;

/// German weekday names, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Montag,
    Dienstag,
    Mittwoch,
    Donnerstag,
    Freitag,
    Samstag,
    Sonntag,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Montag,
        Weekday::Dienstag,
        Weekday::Mittwoch,
        Weekday::Donnerstag,
        Weekday::Freitag,
        Weekday::Samstag,
        Weekday::Sonntag,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Montag => "Montag",
            Weekday::Dienstag => "Dienstag",
            Weekday::Mittwoch => "Mittwoch",
            Weekday::Donnerstag => "Donnerstag",
            Weekday::Freitag => "Freitag",
            Weekday::Samstag => "Samstag",
            Weekday::Sonntag => "Sonntag",
        }
    }

    /// Position in the calendar week (Montag = 0).
    pub fn index(self) -> usize {
        Weekday::ALL.iter().position(|w| *w == self).unwrap_or(0)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        for day in Weekday::ALL {
            if day.name().eq_ignore_ascii_case(trimmed) {
                return Ok(day);
            }
        }
        Err(PlanError::UnknownWeekday(with_suggestion(
            trimmed,
            Weekday::ALL.iter().map(|d| d.name()),
        )))
    }
}

/// The two meal slots of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealSlot {
    Mittagessen,
    Abendessen,
}

impl MealSlot {
    pub const ALL: [MealSlot; 2] = [MealSlot::Mittagessen, MealSlot::Abendessen];

    pub fn name(self) -> &'static str {
        match self {
            MealSlot::Mittagessen => "Mittagessen",
            MealSlot::Abendessen => "Abendessen",
        }
    }

    pub fn index(self) -> usize {
        match self {
            MealSlot::Mittagessen => 0,
            MealSlot::Abendessen => 1,
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MealSlot {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        for slot in MealSlot::ALL {
            if slot.name().eq_ignore_ascii_case(trimmed) {
                return Ok(slot);
            }
        }
        Err(PlanError::UnknownSlot(with_suggestion(
            trimmed,
            MealSlot::ALL.iter().map(|m| m.name()),
        )))
    }
}

/// Append a "meinten Sie ...?" hint when the input is close to a valid name.
fn with_suggestion<'a>(input: &str, valid: impl Iterator<Item = &'a str>) -> String {
    let input_lower = input.to_lowercase();
    let best = valid
        .map(|v| (v, jaro_winkler(&v.to_lowercase(), &input_lower)))
        .filter(|(_, score)| *score > 0.8)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    match best {
        Some((name, _)) => format!("{input} (meinten Sie '{name}'?)"),
        None => input.to_string(),
    }
}

/// Identity of one calendar cell: a weekday plus a meal slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub weekday: Weekday,
    pub slot: MealSlot,
}

impl SlotKey {
    pub fn new(weekday: Weekday, slot: MealSlot) -> Self {
        Self { weekday, slot }
    }

    /// All 14 slot keys in canonical order (Montag Mittagessen first).
    pub fn week() -> Vec<SlotKey> {
        let mut keys = Vec::with_capacity(14);
        for weekday in Weekday::ALL {
            for slot in MealSlot::ALL {
                keys.push(SlotKey::new(weekday, slot));
            }
        }
        keys
    }

    /// Canonical ordering index within the week (0..14).
    pub fn order(self) -> usize {
        self.weekday.index() * 2 + self.slot.index()
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weekday, self.slot)
    }
}

impl FromStr for SlotKey {
    type Err = PlanError;

    /// Parses `"Montag:Abendessen"` or `"Montag Abendessen"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, slot) = s
            .split_once(':')
            .or_else(|| s.trim().split_once(' '))
            .ok_or_else(|| {
                PlanError::InvalidInput(format!(
                    "Expected 'Wochentag:Slot' (e.g. 'Montag:Abendessen'), got '{s}'"
                ))
            })?;
        Ok(SlotKey::new(day.parse()?, slot.parse()?))
    }
}

/// Typical preparation effort of a slot, used to shape search queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotGroup {
    /// Fast meals, 15-20 min (weekday lunches).
    Quick,
    /// Normal effort, 30-40 min (weekday dinners).
    Normal,
    /// Elaborate meals, 50-60 min (weekend and Monday/Tuesday cooking).
    Elaborate,
}

impl SlotKey {
    /// Effort group for this slot.
    pub fn effort_group(self) -> SlotGroup {
        use MealSlot::*;
        use Weekday::*;
        match (self.weekday, self.slot) {
            (Mittwoch | Donnerstag | Freitag, Mittagessen) => SlotGroup::Quick,
            (Dienstag | Mittwoch | Donnerstag | Freitag, Abendessen) => SlotGroup::Normal,
            (Samstag, Mittagessen) => SlotGroup::Normal,
            _ => SlotGroup::Elaborate,
        }
    }
}

/// Recommendations for a single meal slot.
///
/// `selected_index` points into `recommendations`; -1 means "no meal planned".
/// A slot with `reuse_from` set carries no candidates of its own: its
/// effective recipe is always resolved through the referenced primary slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRecommendation {
    pub weekday: Weekday,
    pub slot: MealSlot,
    #[serde(default)]
    pub recommendations: Vec<ScoredRecipe>,
    #[serde(default)]
    pub selected_index: i32,
    #[serde(default)]
    pub reuse_from: Option<SlotKey>,
    #[serde(default = "default_prep_days")]
    pub prep_days: u32,
}

fn default_prep_days() -> u32 {
    1
}

impl SlotRecommendation {
    pub fn new(key: SlotKey, recommendations: Vec<ScoredRecipe>) -> Self {
        Self {
            weekday: key.weekday,
            slot: key.slot,
            recommendations,
            selected_index: 0,
            reuse_from: None,
            prep_days: 1,
        }
    }

    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.weekday, self.slot)
    }

    pub fn is_reuse_slot(&self) -> bool {
        self.reuse_from.is_some()
    }

    /// The user-selected recipe, if any.
    ///
    /// Returns `None` for reuse slots (resolve through the primary), for an
    /// explicit -1 selection, and for an out-of-range index.
    pub fn selected_recipe(&self) -> Option<&ScoredRecipe> {
        if self.reuse_from.is_some() || self.selected_index < 0 {
            return None;
        }
        self.recommendations.get(self.selected_index as usize)
    }

    pub fn top_recipe(&self) -> Option<&ScoredRecipe> {
        self.recommendations.first()
    }
}

impl fmt::Display for SlotRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.selected_recipe() {
            Some(recipe) => write!(f, "{}: {} ({:.0}pt)", self.key(), recipe.title, recipe.score),
            None if self.is_reuse_slot() => {
                write!(f, "{}: Reste von {}", self.key(), self.reuse_from.unwrap())
            }
            None => write!(f, "{}: Kein Gericht", self.key()),
        }
    }
}

/// One "cook once, eat N times" group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiDayGroup {
    pub primary: SlotKey,
    #[serde(default)]
    pub reuse_slots: Vec<SlotKey>,
}

impl MultiDayGroup {
    pub fn total_days(&self) -> u32 {
        1 + self.reuse_slots.len() as u32
    }

    pub fn multiplier(&self) -> f64 {
        self.total_days() as f64
    }
}

/// The single current weekly plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub generated_at: String,
    pub week_start: NaiveDate,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub favorites_count: u32,
    #[serde(default)]
    pub new_count: u32,
    #[serde(default)]
    pub slots: Vec<SlotRecommendation>,
    #[serde(default)]
    pub multi_day_groups: Vec<MultiDayGroup>,
}

impl WeeklyPlan {
    pub fn new(week_start: NaiveDate, slots: Vec<SlotRecommendation>) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            week_start,
            completed_at: None,
            favorites_count: 0,
            new_count: 0,
            slots,
            multi_day_groups: Vec::new(),
        }
    }

    pub fn get_slot(&self, key: SlotKey) -> Option<&SlotRecommendation> {
        self.slots.iter().find(|s| s.key() == key)
    }

    pub fn get_slot_mut(&mut self, key: SlotKey) -> Option<&mut SlotRecommendation> {
        self.slots.iter_mut().find(|s| s.key() == key)
    }

    /// Realized share of favorites among top candidates (target: 0.6).
    pub fn favorites_ratio(&self) -> f64 {
        let total = self.favorites_count + self.new_count;
        if total == 0 {
            0.0
        } else {
            self.favorites_count as f64 / total as f64
        }
    }

    /// Select a candidate index for a slot; -1 means "no meal".
    ///
    /// Rejected without mutation for reuse slots and out-of-range indices.
    pub fn select_recipe(&mut self, key: SlotKey, index: i32) -> crate::error::Result<()> {
        let slot = self
            .get_slot(key)
            .ok_or_else(|| PlanError::SlotNotFound(key.to_string()))?;

        if slot.is_reuse_slot() {
            return Err(PlanError::InvalidInput(format!(
                "{key} ist ein Reste-Slot; Auswahl über den Koch-Slot {}",
                slot.reuse_from.unwrap()
            )));
        }
        if index < -1 || index >= slot.recommendations.len() as i32 {
            return Err(PlanError::InvalidInput(format!(
                "Index {} außerhalb des Bereichs -1..{}",
                index,
                slot.recommendations.len() as i32 - 1
            )));
        }

        // Safe: existence checked above.
        self.get_slot_mut(key).unwrap().selected_index = index;
        Ok(())
    }

    /// Insert a user-supplied recipe at the front of a slot's candidate
    /// list and select it. The list stays capped at five entries.
    pub fn set_custom_recipe(
        &mut self,
        key: SlotKey,
        title: String,
        url: String,
    ) -> crate::error::Result<()> {
        let slot = self
            .get_slot(key)
            .ok_or_else(|| PlanError::SlotNotFound(key.to_string()))?;
        if slot.is_reuse_slot() {
            return Err(PlanError::InvalidInput(format!(
                "{key} ist ein Reste-Slot und kann kein eigenes Rezept führen"
            )));
        }

        let slot = self.get_slot_mut(key).unwrap();
        slot.recommendations.retain(|r| {
            !(r.is_custom && r.url.as_deref() == Some(url.as_str()))
        });
        slot.recommendations.insert(0, ScoredRecipe::custom(title, url));
        slot.recommendations.truncate(5);
        slot.selected_index = 0;
        Ok(())
    }

    /// Remove a previously added custom candidate by its URL.
    pub fn clear_custom_recipe(&mut self, key: SlotKey, url: &str) -> crate::error::Result<()> {
        let slot = self
            .get_slot_mut(key)
            .ok_or_else(|| PlanError::SlotNotFound(key.to_string()))?;

        let before = slot.recommendations.len();
        slot.recommendations
            .retain(|r| !(r.is_custom && r.url.as_deref() == Some(url)));

        if slot.recommendations.len() == before {
            return Err(PlanError::InvalidInput(format!(
                "Kein eigenes Rezept mit URL '{url}' in {key}"
            )));
        }
        if slot.selected_index >= slot.recommendations.len() as i32 {
            slot.selected_index = 0;
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn mark_complete(&mut self) {
        self.completed_at = Some(chrono::Local::now().to_rfc3339());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_parse_roundtrip() {
        for day in Weekday::ALL {
            assert_eq!(day.name().parse::<Weekday>().unwrap(), day);
        }
        assert_eq!("montag".parse::<Weekday>().unwrap(), Weekday::Montag);
        assert!("Funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_weekday_suggestion() {
        let err = "Montagg".parse::<Weekday>().unwrap_err();
        assert!(err.to_string().contains("Montag"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_slot_key_week_order() {
        let week = SlotKey::week();
        assert_eq!(week.len(), 14);
        assert_eq!(week[0], SlotKey::new(Weekday::Montag, MealSlot::Mittagessen));
        assert_eq!(week[13], SlotKey::new(Weekday::Sonntag, MealSlot::Abendessen));
        for (i, key) in week.iter().enumerate() {
            assert_eq!(key.order(), i);
        }
    }

    #[test]
    fn test_slot_key_parse() {
        let key: SlotKey = "Montag:Abendessen".parse().unwrap();
        assert_eq!(key, SlotKey::new(Weekday::Montag, MealSlot::Abendessen));
        let key: SlotKey = "Sonntag Mittagessen".parse().unwrap();
        assert_eq!(key.weekday, Weekday::Sonntag);
        assert!("Montag".parse::<SlotKey>().is_err());
    }

    #[test]
    fn test_effort_groups() {
        assert_eq!(
            SlotKey::new(Weekday::Mittwoch, MealSlot::Mittagessen).effort_group(),
            SlotGroup::Quick
        );
        assert_eq!(
            SlotKey::new(Weekday::Dienstag, MealSlot::Abendessen).effort_group(),
            SlotGroup::Normal
        );
        assert_eq!(
            SlotKey::new(Weekday::Sonntag, MealSlot::Abendessen).effort_group(),
            SlotGroup::Elaborate
        );
    }

    #[test]
    fn test_selected_recipe_negative_index() {
        let key = SlotKey::new(Weekday::Montag, MealSlot::Abendessen);
        let mut slot = SlotRecommendation::new(key, vec![ScoredRecipe::custom(
            "Testgericht".to_string(),
            "https://example.com".to_string(),
        )]);

        assert!(slot.selected_recipe().is_some());
        slot.selected_index = -1;
        assert!(slot.selected_recipe().is_none());
    }

    #[test]
    fn test_select_recipe_validation() {
        let key = SlotKey::new(Weekday::Montag, MealSlot::Abendessen);
        let slots = vec![SlotRecommendation::new(
            key,
            vec![ScoredRecipe::custom(
                "Testgericht".to_string(),
                "https://example.com".to_string(),
            )],
        )];
        let mut plan = WeeklyPlan::new(NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(), slots);

        assert!(plan.select_recipe(key, 0).is_ok());
        assert!(plan.select_recipe(key, -1).is_ok());
        assert!(plan.select_recipe(key, 5).is_err());

        let missing = SlotKey::new(Weekday::Dienstag, MealSlot::Mittagessen);
        let err = plan.select_recipe(missing, 0).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_custom_recipe_set_and_clear() {
        let key = SlotKey::new(Weekday::Freitag, MealSlot::Abendessen);
        let mut plan = WeeklyPlan::new(
            NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
            vec![SlotRecommendation::new(key, Vec::new())],
        );

        plan.set_custom_recipe(key, "Flammkuchen".into(), "https://example.com/f".into())
            .unwrap();
        let slot = plan.get_slot(key).unwrap();
        assert_eq!(slot.recommendations.len(), 1);
        assert!(slot.recommendations[0].is_custom);
        assert_eq!(slot.selected_index, 0);

        plan.clear_custom_recipe(key, "https://example.com/f").unwrap();
        assert!(plan.get_slot(key).unwrap().recommendations.is_empty());

        let err = plan
            .clear_custom_recipe(key, "https://example.com/f")
            .unwrap_err();
        assert!(err.is_validation());
    }
}
