use std::collections::HashMap;
use std::sync::LazyLock;

/// Seasonal calendar for typical German produce.
///
/// Month numbers 1-12; an entry lists the months an ingredient is in
/// season. Ingredients without an entry are assumed available year-round.
static SEASONAL_CALENDAR: LazyLock<HashMap<&'static str, &'static [u32]>> = LazyLock::new(|| {
    let mut m: HashMap<&'static str, &'static [u32]> = HashMap::new();
    // Gemüse mit klarer Saison
    m.insert("spargel", &[4, 5, 6]);
    m.insert("rhabarber", &[4, 5, 6]);
    m.insert("bärlauch", &[3, 4, 5]);
    m.insert("radieschen", &[4, 5, 6, 7, 8, 9]);
    m.insert("kohlrabi", &[5, 6, 7, 8, 9, 10]);
    m.insert("erbse", &[6, 7, 8]);
    m.insert("bohne", &[7, 8, 9]);
    m.insert("zucchini", &[6, 7, 8, 9, 10]);
    m.insert("tomate", &[7, 8, 9, 10]);
    m.insert("paprika", &[7, 8, 9, 10]);
    m.insert("gurke", &[6, 7, 8, 9]);
    m.insert("aubergine", &[7, 8, 9, 10]);
    m.insert("mais", &[8, 9, 10]);
    m.insert("kürbis", &[9, 10, 11, 12]);
    m.insert("hokkaido", &[9, 10, 11, 12]);
    m.insert("butternut", &[9, 10, 11, 12]);
    // Kohl
    m.insert("rosenkohl", &[10, 11, 12, 1, 2]);
    m.insert("grünkohl", &[11, 12, 1, 2]);
    m.insert("wirsing", &[9, 10, 11, 12, 1, 2, 3]);
    m.insert("rotkohl", &[9, 10, 11, 12, 1, 2, 3]);
    m.insert("weißkohl", &[9, 10, 11, 12, 1, 2, 3]);
    m.insert("chinakohl", &[9, 10, 11, 12]);
    // Salate
    m.insert("feldsalat", &[10, 11, 12, 1, 2, 3]);
    m.insert("rucola", &[5, 6, 7, 8, 9, 10]);
    m.insert("kopfsalat", &[5, 6, 7, 8, 9]);
    m.insert("eisbergsalat", &[6, 7, 8, 9]);
    // Obst
    m.insert("erdbeere", &[5, 6, 7]);
    m.insert("himbeere", &[6, 7, 8]);
    m.insert("heidelbeere", &[7, 8, 9]);
    m.insert("brombeere", &[7, 8, 9]);
    m.insert("johannisbeere", &[6, 7, 8]);
    m.insert("stachelbeere", &[6, 7]);
    m.insert("kirsche", &[6, 7]);
    m.insert("pflaume", &[7, 8, 9]);
    m.insert("zwetschge", &[8, 9, 10]);
    m.insert("aprikose", &[7, 8]);
    m.insert("pfirsich", &[7, 8, 9]);
    m.insert("birne", &[8, 9, 10, 11]);
    m.insert("apfel", &[8, 9, 10, 11, 12, 1, 2, 3]);
    m.insert("quitte", &[9, 10, 11]);
    m.insert("traube", &[9, 10]);
    // Ganzjährig (Lagerware/Gewächshaus)
    const ALL_YEAR: &[u32] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
    m.insert("kartoffel", ALL_YEAR);
    m.insert("möhre", ALL_YEAR);
    m.insert("karotte", ALL_YEAR);
    m.insert("zwiebel", ALL_YEAR);
    m.insert("knoblauch", ALL_YEAR);
    m.insert("sellerie", ALL_YEAR);
    m.insert("lauch", ALL_YEAR);
    m.insert("porree", ALL_YEAR);
    m.insert("rote bete", ALL_YEAR);
    m.insert("pastinake", &[10, 11, 12, 1, 2, 3]);
    m.insert("schwarzwurzel", &[10, 11, 12, 1, 2, 3]);
    m.insert("topinambur", &[10, 11, 12, 1, 2, 3]);
    // Pilze
    m.insert("steinpilz", &[8, 9, 10, 11]);
    m.insert("pfifferling", &[6, 7, 8, 9, 10]);
    m.insert("champignon", ALL_YEAR);
    // Kräuter
    m.insert("basilikum", &[6, 7, 8, 9]);
    m.insert("dill", &[5, 6, 7, 8, 9]);
    m.insert("koriander", &[5, 6, 7, 8, 9]);
    m.insert("minze", &[5, 6, 7, 8, 9, 10]);
    m
});

/// Whether an ingredient is in season in the given month.
///
/// Returns `None` when the calendar has no entry, which callers treat as
/// available year-round.
pub fn is_in_season(ingredient: &str, month: u32) -> Option<bool> {
    let name = ingredient.trim().to_lowercase();
    SEASONAL_CALENDAR
        .get(name.as_str())
        .map(|months| months.contains(&month))
}

/// Ingredients that are definitely out of season in the given month.
///
/// Ingredients without calendar data are not included.
pub fn out_of_season_ingredients(ingredients: &[String], month: u32) -> Vec<String> {
    ingredients
        .iter()
        .filter(|i| is_in_season(i, month) == Some(false))
        .cloned()
        .collect()
}

/// Seasonality score in [0, 1]: the fraction of ingredients that are in
/// season or have no calendar entry. Empty input scores 1.0.
pub fn season_score(ingredients: &[String], month: u32) -> f64 {
    if ingredients.is_empty() {
        return 1.0;
    }
    let in_season = ingredients
        .iter()
        .filter(|i| is_in_season(i, month) != Some(false))
        .count();
    in_season as f64 / ingredients.len() as f64
}
