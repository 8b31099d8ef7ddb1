use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use strsim::jaro_winkler;

use crate::availability::seasonality::is_in_season;

/// Minimum similarity for the fuzzy fallback match. High enough that only
/// spelling variants ("kartofel") pass, not different vegetables.
const FUZZY_MATCH_THRESHOLD: f64 = 0.92;

/// Regional naming variants mapped to a canonical form.
///
/// Matching treats the relation as symmetric: "karotte" on a shopping list
/// matches "möhre" in the shop catalog and vice versa.
static INGREDIENT_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    // Gemüse
    m.insert("karotte", "möhre");
    m.insert("mohrrübe", "möhre");
    m.insert("gelbe rübe", "möhre");
    m.insert("wurzel", "möhre");
    m.insert("lauch", "porree");
    m.insert("aubergine", "eierfrucht");
    m.insert("zucchino", "zucchini");
    m.insert("paprikaschote", "paprika");
    m.insert("peperoni", "paprika");
    m.insert("broccoli", "brokkoli");
    m.insert("blaukraut", "rotkohl");
    m.insert("rotkraut", "rotkohl");
    m.insert("weißkraut", "weißkohl");
    m.insert("kraut", "weißkohl");
    m.insert("rosenkohl", "kohlsprossen");
    m.insert("champignon", "steinchampignon");
    m.insert("eierschwammerl", "pfifferling");
    // Obst
    m.insert("mandarine", "clementine");
    m.insert("satsuma", "clementine");
    m.insert("orange", "apfelsine");
    m.insert("apfelsine", "orange");
    // Kartoffeln
    m.insert("erdapfel", "kartoffel");
    m.insert("grundbirne", "kartoffel");
    m
});

/// All names referring to the same ingredient, including the name itself.
pub fn ingredient_synonyms(ingredient: &str) -> HashSet<String> {
    let ingredient = ingredient.to_lowercase();
    let mut synonyms = HashSet::new();
    synonyms.insert(ingredient.clone());

    if let Some(canonical) = INGREDIENT_SYNONYMS.get(ingredient.as_str()) {
        synonyms.insert(canonical.to_string());
    }
    for (syn, canon) in INGREDIENT_SYNONYMS.iter() {
        if *canon == ingredient || *syn == ingredient {
            synonyms.insert(syn.to_string());
            synonyms.insert(canon.to_string());
        }
    }

    synonyms
}

/// The regional shop's current product range, lowercased.
#[derive(Debug, Clone, Default)]
pub struct ShopAvailability {
    products: Vec<String>,
}

impl ShopAvailability {
    pub fn new(products: Vec<String>) -> Self {
        let products = products
            .into_iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { products }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the shop carries this ingredient.
    ///
    /// Matches directly, via synonyms, via substring containment in either
    /// direction ("möhre" matches the product "bund möhren"), and finally
    /// by near-identical spelling to absorb catalog typos.
    pub fn matches(&self, ingredient: &str) -> bool {
        let names = ingredient_synonyms(ingredient);
        self.products.iter().any(|product| {
            names.iter().any(|name| {
                product == name
                    || product.contains(name.as_str())
                    || name.contains(product.as_str())
                    || jaro_winkler(product, name) >= FUZZY_MATCH_THRESHOLD
            })
        })
    }

    /// Whether an ingredient can be sourced at all in the given month.
    ///
    /// Obtainable means: carried by the shop, or in season, or absent from
    /// the seasonal calendar (assumed available year-round).
    pub fn is_obtainable(&self, ingredient: &str, month: u32) -> bool {
        if self.matches(ingredient) {
            return true;
        }
        is_in_season(ingredient, month) != Some(false)
    }

    /// Fraction of ingredients that are obtainable, in [0, 1].
    /// Empty input scores 1.0.
    pub fn obtainable_ratio(&self, ingredients: &[String], month: u32) -> f64 {
        if ingredients.is_empty() {
            return 1.0;
        }
        let obtainable = ingredients
            .iter()
            .filter(|i| self.is_obtainable(i, month))
            .count();
        obtainable as f64 / ingredients.len() as f64
    }

    /// Fraction of ingredients the shop itself carries, in [0, 1].
    pub fn match_ratio(&self, ingredients: &[String]) -> f64 {
        if ingredients.is_empty() {
            return 0.0;
        }
        let matched = ingredients.iter().filter(|i| self.matches(i)).count();
        matched as f64 / ingredients.len() as f64
    }
}
