use dialoguer::{Confirm, Select};

use crate::error::Result;
use crate::models::SlotRecommendation;

/// Interactive candidate picker for one slot.
///
/// Returns the chosen index, or -1 for the explicit "Kein Gericht" entry.
pub fn prompt_select_recipe(slot: &SlotRecommendation) -> Result<i32> {
    let mut options: Vec<String> = slot
        .recommendations
        .iter()
        .map(|r| r.to_string())
        .collect();
    options.push("Kein Gericht".to_string());

    let default = if slot.selected_index >= 0 {
        slot.selected_index as usize
    } else {
        options.len() - 1
    };

    let selection = Select::new()
        .with_prompt(format!("Gericht für {}", slot.key()))
        .items(&options)
        .default(default.min(options.len() - 1))
        .interact()?;

    if selection == options.len() - 1 {
        Ok(-1)
    } else {
        Ok(selection as i32)
    }
}

/// Yes/no confirmation, used before destructive operations.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
