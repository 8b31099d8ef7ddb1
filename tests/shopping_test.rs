mod common;

use std::io::Read;

use chrono::NaiveDate;
use common::{parsed, MemStore};
use essensplaner::availability::ShopAvailability;
use essensplaner::models::{
    MealSlot, ScoredRecipe, SlotKey, SlotRecommendation, Weekday, WeeklyPlan,
};
use essensplaner::shopping::{generate_shopping_list, split_shopping_list, write_csv};

fn empty_plan() -> WeeklyPlan {
    let slots = SlotKey::week()
        .into_iter()
        .map(|key| SlotRecommendation::new(key, Vec::new()))
        .collect();
    WeeklyPlan::new(NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(), slots)
}

fn favorite(id: i64, title: &str, servings: u32) -> ScoredRecipe {
    ScoredRecipe {
        title: title.to_string(),
        url: None,
        score: 80.0,
        reasoning: String::new(),
        is_new: false,
        recipe_id: Some(id),
        prep_time_minutes: Some(30),
        calories: None,
        servings: Some(servings),
        ingredients: Vec::new(),
        is_custom: false,
    }
}

fn set_candidate(plan: &mut WeeklyPlan, key: SlotKey, recipe: ScoredRecipe) {
    plan.get_slot_mut(key).unwrap().recommendations = vec![recipe];
}

fn item<'a>(
    list: &'a essensplaner::shopping::ShoppingList,
    name: &str,
) -> &'a essensplaner::shopping::ShoppingItem {
    list.items
        .iter()
        .find(|i| i.name == name)
        .unwrap_or_else(|| panic!("kein Eintrag '{name}' in {:?}", list.items))
}

#[test]
fn amounts_scale_by_household_and_prep_days() {
    let mut store = MemStore::default();
    store.add_parsed(1, vec![parsed("200 g Reis", Some(200.0), Some("gramm"), "reis")]);

    let mut plan = empty_plan();
    let primary = SlotKey::new(Weekday::Sonntag, MealSlot::Mittagessen);
    set_candidate(&mut plan, primary, favorite(1, "Reispfanne", 4));

    // 4 servings cooked for 2 people: half the recipe.
    let list = generate_shopping_list(&plan, 2, &store).unwrap();
    assert_eq!(item(&list, "reis").amount, Some(100.0));
    assert!(list.scale_info.iter().any(|s| s.contains("Reispfanne")));

    // Cooking for three days triples the batch.
    plan.set_multi_day(
        primary,
        vec![
            SlotKey::new(Weekday::Montag, MealSlot::Mittagessen),
            SlotKey::new(Weekday::Dienstag, MealSlot::Mittagessen),
        ],
    )
    .unwrap();
    let list = generate_shopping_list(&plan, 2, &store).unwrap();
    let reis = item(&list, "reis");
    assert_eq!(reis.amount, Some(300.0));
    assert_eq!(
        reis.slots,
        vec!["Sonntag Mittagessen + Montag Mittagessen + Dienstag Mittagessen".to_string()]
    );
    assert_eq!(list.recipe_count, 1);
    assert!(!list.multi_day_info.is_empty());
}

#[test]
fn same_ingredient_from_two_slots_is_aggregated() {
    let mut store = MemStore::default();
    store.add_parsed(1, vec![parsed("300 g Möhren", Some(300.0), Some("gramm"), "möhre")]);
    store.add_parsed(2, vec![parsed("250 g Möhren", Some(250.0), Some("gramm"), "möhre")]);

    let mut plan = empty_plan();
    let a = SlotKey::new(Weekday::Montag, MealSlot::Abendessen);
    let b = SlotKey::new(Weekday::Mittwoch, MealSlot::Abendessen);
    set_candidate(&mut plan, a, favorite(1, "Möhreneintopf", 2));
    set_candidate(&mut plan, b, favorite(2, "Möhrensalat", 2));

    let list = generate_shopping_list(&plan, 2, &store).unwrap();
    let moehre = item(&list, "möhre");
    assert_eq!(moehre.amount, Some(550.0));
    assert_eq!(moehre.slots.len(), 2);
}

#[test]
fn taste_categories_merge_ingredient_variants() {
    let mut store = MemStore::default();
    let mut kirsch = parsed(
        "200 g Kirschtomaten",
        Some(200.0),
        Some("gramm"),
        "kirschtomate",
    );
    kirsch.base_ingredient = Some("tomate".to_string());
    store.add_parsed(
        1,
        vec![
            kirsch,
            parsed("100 g Tomaten", Some(100.0), Some("gramm"), "tomate"),
        ],
    );

    let mut plan = empty_plan();
    set_candidate(
        &mut plan,
        SlotKey::new(Weekday::Montag, MealSlot::Abendessen),
        favorite(1, "Tomatensalat", 2),
    );

    let list = generate_shopping_list(&plan, 2, &store).unwrap();
    assert_eq!(list.items.len(), 1);
    let tomate = item(&list, "tomate");
    assert_eq!(tomate.amount, Some(300.0));
}

#[test]
fn deselected_slot_contributes_nothing() {
    let mut store = MemStore::default();
    store.add_parsed(1, vec![parsed("200 g Reis", Some(200.0), Some("gramm"), "reis")]);

    let mut plan = empty_plan();
    let key = SlotKey::new(Weekday::Freitag, MealSlot::Abendessen);
    set_candidate(&mut plan, key, favorite(1, "Reispfanne", 2));
    plan.select_recipe(key, -1).unwrap();

    let list = generate_shopping_list(&plan, 2, &store).unwrap();
    assert!(list.items.is_empty());
    assert_eq!(list.recipe_count, 0);
}

#[test]
fn unparsed_recipe_falls_back_to_raw_lines() {
    let store = MemStore::default();

    let mut plan = empty_plan();
    let key = SlotKey::new(Weekday::Samstag, MealSlot::Abendessen);
    let mut recipe = favorite(99, "Neues Curry", 2);
    recipe.recipe_id = None;
    recipe.is_new = true;
    recipe.url = Some("https://example.com/curry".to_string());
    recipe.ingredients = vec!["1 Dose Kokosmilch".to_string(), "  Salz ".to_string()];
    set_candidate(&mut plan, key, recipe);

    let list = generate_shopping_list(&plan, 2, &store).unwrap();
    assert_eq!(list.items.len(), 2);
    let coconut = item(&list, "1 dose kokosmilch");
    assert_eq!(coconut.amount, None);
    assert_eq!(coconut.unit, None);
    assert!(list.items.iter().any(|i| i.name == "salz"));
}

#[test]
fn regeneration_is_stable() {
    let mut store = MemStore::default();
    store.add_parsed(
        1,
        vec![
            parsed("200 g Reis", Some(200.0), Some("gramm"), "reis"),
            parsed("2 Zwiebeln", Some(2.0), Some("stück"), "zwiebel"),
        ],
    );
    store.add_parsed(2, vec![parsed("1 EL Öl", Some(1.0), Some("esslöffel"), "öl")]);

    let mut plan = empty_plan();
    set_candidate(
        &mut plan,
        SlotKey::new(Weekday::Montag, MealSlot::Abendessen),
        favorite(1, "Reispfanne", 2),
    );
    set_candidate(
        &mut plan,
        SlotKey::new(Weekday::Dienstag, MealSlot::Abendessen),
        favorite(2, "Bratkartoffeln", 2),
    );

    let first = generate_shopping_list(&plan, 3, &store).unwrap();
    let second = generate_shopping_list(&plan, 3, &store).unwrap();
    assert_eq!(first.items, second.items);

    // Sorted by name, so output order is deterministic.
    let names: Vec<&str> = first.items.iter().map(|i| i.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn split_routes_synonyms_to_the_farm_shop() {
    let mut store = MemStore::default();
    store.add_parsed(
        1,
        vec![
            parsed("300 g Möhren", Some(300.0), Some("gramm"), "möhre"),
            parsed("100 g Schokolade", Some(100.0), Some("gramm"), "schokolade"),
        ],
    );

    let mut plan = empty_plan();
    set_candidate(
        &mut plan,
        SlotKey::new(Weekday::Montag, MealSlot::Abendessen),
        favorite(1, "Möhreneintopf", 2),
    );

    let list = generate_shopping_list(&plan, 2, &store).unwrap();
    // Catalog lists "karotten"; möhre must match via synonym.
    let shop = ShopAvailability::new(vec!["Karotten".to_string()]);
    let split = split_shopping_list(&list, &shop);

    assert_eq!(split.shop_items.len(), 1);
    assert_eq!(split.shop_items[0].name, "möhre");
    assert_eq!(split.other_items.len(), 1);
    assert_eq!(split.other_items[0].name, "schokolade");
    assert_eq!(split.total_items(), 2);
}

#[test]
fn csv_export_uses_semicolons() {
    let mut store = MemStore::default();
    store.add_parsed(1, vec![parsed("200 g Reis", Some(200.0), Some("gramm"), "reis")]);

    let mut plan = empty_plan();
    set_candidate(
        &mut plan,
        SlotKey::new(Weekday::Montag, MealSlot::Abendessen),
        favorite(1, "Reispfanne", 2),
    );

    let list = generate_shopping_list(&plan, 2, &store).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("einkauf.csv");
    write_csv(&list, &path).unwrap();

    let mut contents = String::new();
    std::fs::File::open(&path)
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert!(contents.starts_with("Zutat;Menge;Einheit;Slots"));
    assert!(contents.contains("reis;200;gramm;Montag Abendessen"));
}
