use std::path::Path;

use chrono::Datelike;
use clap::Parser;

use essensplaner::availability::ShopAvailability;
use essensplaner::cli::{Cli, Command, CustomAction, MultiDayAction, PrefsAction};
use essensplaner::error::{PlanError, Result};
use essensplaner::interface::prompts::{prompt_select_recipe, prompt_yes_no};
use essensplaner::interface::render::{
    display_plan, display_plan_detailed, display_shopping_list, display_split_list,
};
use essensplaner::models::SlotKey;
use essensplaner::planner::{generate_weekly_plan, next_monday, NoSearch};
use essensplaner::shopping::{generate_shopping_list, split_shopping_list, write_csv};
use essensplaner::state::{LocalStore, PlanStore, RecipeStore, UserConfig};

fn main() {
    if let Err(e) = run() {
        eprintln!("Fehler: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();
    let data_dir = Path::new(&cli.data_dir);

    match command {
        Command::Generate => cmd_generate(data_dir),
        Command::Show { detailed } => cmd_show(data_dir, detailed),
        Command::Select {
            weekday,
            slot,
            index,
        } => cmd_select(data_dir, &weekday, &slot, index),
        Command::Custom { action } => cmd_custom(data_dir, action),
        Command::MultiDay { action } => cmd_multi_day(data_dir, action),
        Command::Prefs { action } => cmd_prefs(data_dir, action),
        Command::Shopping {
            household,
            split,
            csv,
        } => cmd_shopping(data_dir, household, split, csv.as_deref()),
        Command::Complete => cmd_complete(data_dir),
        Command::Delete { yes } => cmd_delete(data_dir, yes),
    }
}

fn slot_key(weekday: &str, slot: &str) -> Result<SlotKey> {
    Ok(SlotKey::new(weekday.parse()?, slot.parse()?))
}

/// Generate a fresh plan for the coming week and persist it.
fn cmd_generate(data_dir: &Path) -> Result<()> {
    let store = LocalStore::open(data_dir)?;
    let config = UserConfig::load(data_dir)?;
    let plan_store = PlanStore::new(data_dir);

    println!("Lade Rezepte aus {}...", data_dir.display());
    println!("  {} Rezepte im Bestand", store.recipe_count());

    let today = chrono::Local::now().date_naive();
    let week_start = next_monday(today);
    println!("Plane Woche ab {week_start}...");

    let plan = generate_weekly_plan(&store, &NoSearch, &config, week_start, today.month())?;
    plan_store.save(&plan)?;

    println!(
        "Plan gespeichert: {} Favoriten, {} neue Rezepte",
        plan.favorites_count, plan.new_count
    );
    display_plan(&plan);
    Ok(())
}

fn cmd_show(data_dir: &Path, detailed: bool) -> Result<()> {
    let plan = PlanStore::new(data_dir).load()?;
    if detailed {
        display_plan_detailed(&plan);
    } else {
        display_plan(&plan);
    }
    Ok(())
}

fn cmd_select(data_dir: &Path, weekday: &str, slot: &str, index: Option<i32>) -> Result<()> {
    let key = slot_key(weekday, slot)?;
    let plan_store = PlanStore::new(data_dir);
    let mut plan = plan_store.load()?;

    let index = match index {
        Some(index) => index,
        None => {
            let slot = plan
                .get_slot(key)
                .ok_or_else(|| PlanError::SlotNotFound(key.to_string()))?;
            if slot.is_reuse_slot() {
                return Err(PlanError::InvalidInput(format!(
                    "{key} ist ein Reste-Slot; Auswahl über den Koch-Slot"
                )));
            }
            prompt_select_recipe(slot)?
        }
    };

    plan.select_recipe(key, index)?;
    plan_store.save(&plan)?;

    match plan.recipe_for_slot(key) {
        Some(recipe) => println!("{key}: {} ausgewählt", recipe.title),
        None => println!("{key}: Kein Gericht"),
    }
    Ok(())
}

fn cmd_custom(data_dir: &Path, action: CustomAction) -> Result<()> {
    let plan_store = PlanStore::new(data_dir);
    let mut plan = plan_store.load()?;

    match action {
        CustomAction::Set {
            weekday,
            slot,
            title,
            url,
        } => {
            let key = slot_key(&weekday, &slot)?;
            plan.set_custom_recipe(key, title.clone(), url)?;
            println!("{key}: eigenes Rezept '{title}' gesetzt");
        }
        CustomAction::Clear { weekday, slot, url } => {
            let key = slot_key(&weekday, &slot)?;
            plan.clear_custom_recipe(key, &url)?;
            println!("{key}: eigenes Rezept entfernt");
        }
    }

    plan_store.save(&plan)
}

fn cmd_multi_day(data_dir: &Path, action: MultiDayAction) -> Result<()> {
    let plan_store = PlanStore::new(data_dir);

    match action {
        MultiDayAction::Set { primary, reuse } => {
            let mut plan = plan_store.load()?;
            let primary: SlotKey = primary.parse()?;
            let reuse: Vec<SlotKey> = reuse
                .iter()
                .map(|s| s.parse())
                .collect::<Result<Vec<_>>>()?;
            let total_days = 1 + reuse.len();
            plan.set_multi_day(primary, reuse)?;
            plan_store.save(&plan)?;
            println!("{primary}: kochen für {total_days} Tage eingerichtet");
        }
        MultiDayAction::Clear { slot } => {
            let mut plan = plan_store.load()?;
            let key: SlotKey = slot.parse()?;
            plan.clear_multi_day(key)?;
            plan_store.save(&plan)?;
            println!("{key}: Multi-Day aufgelöst");
        }
        MultiDayAction::Show => {
            let plan = plan_store.load()?;
            if plan.multi_day_groups.is_empty() {
                println!("Keine Multi-Day-Gruppen aktiv.");
            }
            for group in &plan.multi_day_groups {
                let reuse: Vec<String> =
                    group.reuse_slots.iter().map(|k| k.to_string()).collect();
                println!(
                    "{} kochen ({} Tage), Reste: {}",
                    group.primary,
                    group.total_days(),
                    reuse.join(", ")
                );
            }
        }
    }
    Ok(())
}

fn cmd_prefs(data_dir: &Path, action: PrefsAction) -> Result<()> {
    let mut config = UserConfig::load(data_dir)?;

    match action {
        PrefsAction::Show => {
            println!("Haushaltsgröße: {}", config.household_size);
            if !config.multi_day_preferences.is_empty() {
                println!("Multi-Day-Voreinstellungen:");
                for group in &config.multi_day_preferences {
                    let reuse: Vec<String> =
                        group.reuse_slots.iter().map(|k| k.to_string()).collect();
                    println!("  {} → {}", group.primary, reuse.join(", "));
                }
            }
            if !config.skipped_slots.is_empty() {
                let skipped: Vec<String> =
                    config.skipped_slots.iter().map(|k| k.to_string()).collect();
                println!("Übersprungene Slots: {}", skipped.join(", "));
            }
            return Ok(());
        }
        PrefsAction::SetHousehold { size } => {
            if size == 0 {
                return Err(PlanError::InvalidInput(
                    "Haushaltsgröße muss mindestens 1 sein".to_string(),
                ));
            }
            config.household_size = size;
            println!("Haushaltsgröße auf {size} gesetzt.");
        }
        PrefsAction::SetMultiDay { primary, reuse } => {
            let primary: SlotKey = primary.parse()?;
            let reuse: Vec<SlotKey> = reuse
                .iter()
                .map(|s| s.parse())
                .collect::<Result<Vec<_>>>()?;
            validate_multi_day_preference(&config, primary, &reuse)?;

            config
                .multi_day_preferences
                .retain(|g| g.primary != primary);
            config
                .multi_day_preferences
                .push(essensplaner::models::MultiDayGroup {
                    primary,
                    reuse_slots: reuse,
                });
            println!("Multi-Day-Voreinstellung für {primary} gespeichert.");
        }
        PrefsAction::ClearMultiDay { primary } => {
            let primary: SlotKey = primary.parse()?;
            let before = config.multi_day_preferences.len();
            config
                .multi_day_preferences
                .retain(|g| g.primary != primary);
            if config.multi_day_preferences.len() == before {
                return Err(PlanError::InvalidInput(format!(
                    "Keine Voreinstellung für {primary}"
                )));
            }
            println!("Voreinstellung für {primary} entfernt.");
        }
        PrefsAction::Skip { weekday, slot } => {
            let key = slot_key(&weekday, &slot)?;
            if config.skip_slot(key) {
                println!("{key} wird übersprungen.");
            } else {
                println!("{key} war bereits übersprungen.");
            }
        }
        PrefsAction::Unskip { weekday, slot } => {
            let key = slot_key(&weekday, &slot)?;
            if config.unskip_slot(key) {
                println!("{key} wird wieder geplant.");
            } else {
                println!("{key} war nicht übersprungen.");
            }
        }
    }

    config.save(data_dir)
}

/// Standing preferences follow the same rules as live groups: non-empty,
/// no self-reference, no duplicates, disjoint across groups.
fn validate_multi_day_preference(
    config: &UserConfig,
    primary: SlotKey,
    reuse: &[SlotKey],
) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for &key in reuse {
        if key == primary {
            return Err(PlanError::InvalidInput(format!(
                "{primary} kann nicht sein eigener Reste-Slot sein"
            )));
        }
        if !seen.insert(key) {
            return Err(PlanError::InvalidInput(format!(
                "Reste-Slot {key} mehrfach angegeben"
            )));
        }
    }
    for group in config
        .multi_day_preferences
        .iter()
        .filter(|g| g.primary != primary)
    {
        for &key in reuse {
            if key == group.primary || group.reuse_slots.contains(&key) {
                return Err(PlanError::InvalidInput(format!(
                    "{key} ist bereits Teil der Gruppe von {}",
                    group.primary
                )));
            }
        }
        if group.reuse_slots.contains(&primary) {
            return Err(PlanError::InvalidInput(format!(
                "{primary} ist bereits Reste-Slot von {}",
                group.primary
            )));
        }
    }
    Ok(())
}

fn cmd_shopping(
    data_dir: &Path,
    household: Option<u32>,
    split: bool,
    csv: Option<&str>,
) -> Result<()> {
    let plan = PlanStore::new(data_dir).load()?;
    let store = LocalStore::open(data_dir)?;
    let config = UserConfig::load(data_dir)?;
    let household_size = household.unwrap_or(config.household_size);

    if household_size == 0 {
        return Err(PlanError::InvalidInput(
            "Haushaltsgröße muss mindestens 1 sein".to_string(),
        ));
    }

    let list = generate_shopping_list(&plan, household_size, &store)?;

    if split {
        let shop = ShopAvailability::new(store.available_ingredients()?);
        display_split_list(&split_shopping_list(&list, &shop));
    } else {
        display_shopping_list(&list);
    }

    if let Some(path) = csv {
        write_csv(&list, path)?;
        println!("CSV geschrieben: {path}");
    }
    Ok(())
}

fn cmd_complete(data_dir: &Path) -> Result<()> {
    let plan_store = PlanStore::new(data_dir);
    let mut plan = plan_store.load()?;

    if plan.is_complete() {
        println!("Plan ist bereits abgeschlossen.");
        return Ok(());
    }
    plan.mark_complete();
    plan_store.save(&plan)?;
    println!("Plan abgeschlossen.");
    Ok(())
}

fn cmd_delete(data_dir: &Path, yes: bool) -> Result<()> {
    let plan_store = PlanStore::new(data_dir);
    if !plan_store.exists() {
        return Err(PlanError::NoPlan);
    }

    if !yes && !prompt_yes_no("Aktuellen Wochenplan wirklich löschen?", false)? {
        println!("Abgebrochen.");
        return Ok(());
    }

    plan_store.delete()?;
    println!("Wochenplan gelöscht.");
    Ok(())
}
