use crate::models::{WeeklyPlan, Weekday};
use crate::shopping::{ShoppingList, SplitShoppingList, FALLBACK_BUCKET, SHOP_BUCKET};

/// Print the weekly plan, one line per slot, grouped by day.
pub fn display_plan(plan: &WeeklyPlan) {
    println!();
    println!("=== Wochenplan ab {} ===", plan.week_start);
    println!(
        "Favoriten: {} | Neue Rezepte: {} | Favoriten-Anteil: {:.0}%",
        plan.favorites_count,
        plan.new_count,
        plan.favorites_ratio() * 100.0
    );
    if let Some(completed) = &plan.completed_at {
        println!("Abgeschlossen am {}", &completed[..10.min(completed.len())]);
    }
    println!();

    for weekday in Weekday::ALL {
        for slot in plan.slots.iter().filter(|s| s.weekday == weekday) {
            println!("  {slot}");
        }
    }
    println!();
}

/// Print the plan with all candidates and their reasoning.
pub fn display_plan_detailed(plan: &WeeklyPlan) {
    display_plan(plan);

    for slot in &plan.slots {
        if slot.is_reuse_slot() || slot.recommendations.is_empty() {
            continue;
        }
        println!("--- {} ---", slot.key());
        for (i, candidate) in slot.recommendations.iter().enumerate() {
            let marker = if i as i32 == slot.selected_index {
                ">"
            } else {
                " "
            };
            println!("{marker} {}. {candidate}", i + 1);
            if !candidate.reasoning.is_empty() {
                println!("     {}", candidate.reasoning);
            }
        }
        println!();
    }

    if !plan.multi_day_groups.is_empty() {
        println!("--- Multi-Day ---");
        for group in &plan.multi_day_groups {
            let reuse: Vec<String> = group.reuse_slots.iter().map(|k| k.to_string()).collect();
            println!(
                "  {} kochen für {} Tage (Reste: {})",
                group.primary,
                group.total_days(),
                reuse.join(", ")
            );
        }
        println!();
    }
}

/// Print the aggregated shopping list with its transparency notes.
pub fn display_shopping_list(list: &ShoppingList) {
    println!();
    println!(
        "=== Einkaufsliste ab {} ({} Gerichte, {} Personen) ===",
        list.week_start, list.recipe_count, list.household_size
    );
    println!();

    for item in &list.items {
        println!("  [ ] {}", item.display_line());
        if !item.slots.is_empty() {
            println!("      für: {}", item.slots.join(", "));
        }
    }

    if !list.scale_info.is_empty() {
        println!();
        println!("--- Skalierung ---");
        for note in &list.scale_info {
            println!("  {note}");
        }
    }
    if !list.multi_day_info.is_empty() {
        println!();
        println!("--- Multi-Day ---");
        for note in &list.multi_day_info {
            println!("  {note}");
        }
    }
    println!();
}

/// Print the store-split shopping list as two buckets.
pub fn display_split_list(split: &SplitShoppingList) {
    println!();
    println!("=== {SHOP_BUCKET} ({} Artikel) ===", split.shop_items.len());
    for item in &split.shop_items {
        println!("  [ ] {}", item.display_line());
    }
    println!();
    println!(
        "=== {FALLBACK_BUCKET} ({} Artikel) ===",
        split.other_items.len()
    );
    for item in &split.other_items {
        println!("  [ ] {}", item.display_line());
    }
    println!();
}
