use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ingredients::parser::{normalize_unit, unit_class, UnitClass};
use crate::models::{ParsedIngredient, SlotKey, WeeklyPlan};
use crate::state::RecipeStore;

/// One aggregated line of the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    /// Human-readable labels of the slots this item cooks for.
    #[serde(default)]
    pub slots: Vec<String>,
}

impl ShoppingItem {
    /// Render as "200 gramm reis" or just the name.
    pub fn display_line(&self) -> String {
        match (self.amount, self.unit.as_deref()) {
            (Some(amount), Some(unit)) => format!("{} {unit} {}", format_amount(amount), self.name),
            (Some(amount), None) => format!("{} {}", format_amount(amount), self.name),
            _ => self.name.clone(),
        }
    }
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount}")
    }
}

/// The derived shopping list for the current plan. Never persisted as the
/// source of truth; recomputed on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingList {
    pub week_start: NaiveDate,
    pub recipe_count: u32,
    pub household_size: u32,
    pub items: Vec<ShoppingItem>,
    /// Transparency notes about serving/batch scaling. No downstream
    /// semantics.
    #[serde(default)]
    pub scale_info: Vec<String>,
    /// Transparency notes about active multi-day groups.
    #[serde(default)]
    pub multi_day_info: Vec<String>,
}

/// Round an aggregated amount to a human-usable increment for its unit.
pub fn round_amount(amount: f64, unit: Option<&str>) -> f64 {
    match unit_class(unit) {
        UnitClass::MassVolume => (amount / 10.0).round() * 10.0,
        UnitClass::Count => amount.round().max(1.0),
        UnitClass::Spoon => (amount * 2.0).round() / 2.0,
        UnitClass::Other => (amount * 10.0).round() / 10.0,
    }
}

/// The label under which a slot's ingredients appear on the list. For a
/// multi-day primary this concatenates the cook slot and all reuse slots.
fn slot_label(plan: &WeeklyPlan, key: SlotKey) -> String {
    match plan.multi_day_group(key).filter(|g| g.primary == key) {
        Some(group) => {
            let mut parts = vec![key.to_string()];
            parts.extend(group.reuse_slots.iter().map(|k| k.to_string()));
            parts.join(" + ")
        }
        None => key.to_string(),
    }
}

/// Build the consolidated shopping list for every effective selection.
///
/// Reuse slots contribute nothing of their own; their consumption is
/// covered by the primary slot's `prep_days` multiplier. Items are keyed
/// by taste category (falling back to the parsed name), so stored variants
/// of the same ingredient land on one line. Recipes without parsed store
/// entries fall back to their raw ingredient lines, carried unscaled and
/// without amounts.
pub fn generate_shopping_list(
    plan: &WeeklyPlan,
    household_size: u32,
    store: &dyn RecipeStore,
) -> Result<ShoppingList> {
    let mut aggregated: HashMap<(String, Option<String>), ShoppingItem> = HashMap::new();
    let mut scale_info = Vec::new();
    let mut recipe_count = 0u32;

    for slot in &plan.slots {
        if slot.is_reuse_slot() {
            continue;
        }
        let Some(recipe) = slot.selected_recipe() else {
            continue;
        };
        recipe_count += 1;

        let servings = recipe.servings.unwrap_or(2);
        let household_factor = household_size as f64 / servings as f64;
        let total_factor = household_factor * slot.prep_days as f64;
        let label = slot_label(plan, slot.key());

        if servings != household_size || slot.prep_days > 1 {
            let mut note = format!(
                "{}: {servings} Portionen → {household_size} Personen",
                recipe.title
            );
            if slot.prep_days > 1 {
                note.push_str(&format!(" × {} Tage", slot.prep_days));
            }
            note.push_str(&format!(" (Faktor {total_factor:.2})"));
            scale_info.push(note);
        }

        let parsed = match recipe.recipe_id {
            Some(id) => store.parsed_ingredients(id)?,
            None => Vec::new(),
        };
        let ingredients: Vec<ParsedIngredient> = if parsed.is_empty() {
            // Best-effort fallback for recipes not yet in the store.
            recipe
                .ingredients
                .iter()
                .map(|line| ParsedIngredient {
                    original: line.clone(),
                    amount: None,
                    unit: None,
                    name: line.trim().to_lowercase(),
                    base_ingredient: None,
                })
                .collect()
        } else {
            parsed
        };

        for ingredient in ingredients {
            if ingredient.name.is_empty() {
                continue;
            }
            let unit = normalize_unit(ingredient.unit.as_deref());
            // Taste category merges variants ("kirschtomate" + "tomate").
            let key = (ingredient.category().to_lowercase(), unit.clone());
            let scaled = ingredient.amount.map(|a| a * total_factor);

            let entry = aggregated.entry(key.clone()).or_insert_with(|| ShoppingItem {
                name: key.0.clone(),
                amount: None,
                unit,
                slots: Vec::new(),
            });
            if let Some(scaled) = scaled {
                entry.amount = Some(entry.amount.unwrap_or(0.0) + scaled);
            }
            if !entry.slots.contains(&label) {
                entry.slots.push(label.clone());
            }
        }
    }

    let mut items: Vec<ShoppingItem> = aggregated.into_values().collect();
    for item in &mut items {
        if let Some(amount) = item.amount {
            item.amount = Some(round_amount(amount, item.unit.as_deref()));
        }
    }
    items.sort_by(|a, b| a.name.cmp(&b.name));

    let multi_day_info = plan
        .multi_day_groups
        .iter()
        .map(|group| {
            let reuse: Vec<String> = group.reuse_slots.iter().map(|k| k.to_string()).collect();
            format!(
                "{} kochen, Reste: {} ({} Tage, ×{:.0})",
                group.primary,
                reuse.join(", "),
                group.total_days(),
                group.multiplier()
            )
        })
        .collect();

    Ok(ShoppingList {
        week_start: plan.week_start,
        recipe_count,
        household_size,
        items,
        scale_info,
        multi_day_info,
    })
}

/// Export the list as semicolon-separated CSV.
pub fn write_csv<P: AsRef<Path>>(list: &ShoppingList, path: P) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path.as_ref())?;
    writer.write_record(["Zutat", "Menge", "Einheit", "Slots"])?;
    for item in &list.items {
        writer.write_record([
            item.name.as_str(),
            &item.amount.map(format_amount).unwrap_or_default(),
            item.unit.as_deref().unwrap_or(""),
            &item.slots.join(" | "),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
