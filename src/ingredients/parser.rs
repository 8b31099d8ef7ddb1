use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::ParsedIngredient;

/// Maps unit spellings (German and English) to the closed normalized
/// vocabulary used for aggregation.
static UNIT_MAPPING: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    // German units
    m.insert("el", "esslöffel");
    m.insert("esslöffel", "esslöffel");
    m.insert("essl.", "esslöffel");
    m.insert("tl", "teelöffel");
    m.insert("teelöffel", "teelöffel");
    m.insert("teel.", "teelöffel");
    m.insert("g", "gramm");
    m.insert("gramm", "gramm");
    m.insert("kg", "kilogramm");
    m.insert("kilogramm", "kilogramm");
    m.insert("ml", "milliliter");
    m.insert("milliliter", "milliliter");
    m.insert("l", "liter");
    m.insert("liter", "liter");
    m.insert("stück", "stück");
    m.insert("stk", "stück");
    m.insert("prise", "prise");
    m.insert("prisen", "prise");
    m.insert("bund", "bund");
    m.insert("zehe", "zehe");
    m.insert("zehen", "zehe");
    m.insert("scheibe", "scheibe");
    m.insert("scheiben", "scheibe");
    m.insert("dose", "dose");
    m.insert("dosen", "dose");
    m.insert("becher", "becher");
    m.insert("tasse", "tasse");
    m.insert("tassen", "tasse");
    m.insert("handvoll", "handvoll");
    m.insert("msp", "messerspitze");
    m.insert("msp.", "messerspitze");
    m.insert("messerspitze", "messerspitze");
    m.insert("zweig", "zweig");
    m.insert("zweige", "zweig");
    m.insert("stiel", "stiel");
    m.insert("stiele", "stiel");
    m.insert("blatt", "blatt");
    m.insert("blätter", "blatt");
    // English units
    m.insert("teaspoon", "teelöffel");
    m.insert("teaspoons", "teelöffel");
    m.insert("tablespoon", "esslöffel");
    m.insert("tablespoons", "esslöffel");
    m.insert("cup", "tasse");
    m.insert("cups", "tasse");
    m.insert("clove", "zehe");
    m.insert("cloves", "zehe");
    m.insert("bunch", "bund");
    m.insert("stick", "stiel");
    m.insert("sticks", "stiel");
    m.insert("tin", "dose");
    m.insert("tins", "dose");
    m.insert("medium", "stück");
    m.insert("large", "stück");
    m.insert("small", "stück");
    m
});

static PARENS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").expect("valid regex"));
static MULTIPLIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*x\s*(\d+)").expect("valid regex"));
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:[.,]\d+)?)\s*([a-zA-ZäöüÄÖÜß]+)?\s*(.*)$").expect("valid regex")
});
static LEADING_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[.,;:\-/½¼¾]+\s*").expect("valid regex"));
static FILLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(von|vom|der|die|das|ein|eine|einem|einer|frisch|frische|frischer|gehackt|gehackte|gehackter|gewürfelt|gewürfelte|klein|kleine|kleiner|groß|große|großer|fein|feine|feiner|grob|grobe|optional|wahlweise|etwa|ca|circa)\b",
    )
    .expect("valid regex")
});
static OF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bof\s+").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize a unit string to its canonical form.
///
/// Unknown units pass through lowercased so they still group consistently.
pub fn normalize_unit(unit: Option<&str>) -> Option<String> {
    let unit = unit?.trim().to_lowercase();
    if unit.is_empty() {
        return None;
    }
    Some(
        UNIT_MAPPING
            .get(unit.as_str())
            .map(|s| s.to_string())
            .unwrap_or(unit),
    )
}

fn is_canonical_unit(unit: &str) -> bool {
    UNIT_MAPPING.values().any(|v| *v == unit)
}

/// Rounding class of a normalized unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitClass {
    /// gramm, kilogramm, milliliter, liter.
    MassVolume,
    /// stück, scheibe.
    Count,
    /// esslöffel, teelöffel.
    Spoon,
    Other,
}

pub fn unit_class(unit: Option<&str>) -> UnitClass {
    match unit {
        Some("gramm" | "kilogramm" | "milliliter" | "liter") => UnitClass::MassVolume,
        Some("stück" | "scheibe") => UnitClass::Count,
        Some("esslöffel" | "teelöffel") => UnitClass::Spoon,
        _ => UnitClass::Other,
    }
}

/// Normalize an ingredient name: lowercase, strip fillers and punctuation,
/// collapse whitespace, naive German plural to singular.
pub fn normalize_name(name: &str) -> String {
    let mut name = name.to_lowercase().trim().to_string();

    name = LEADING_PUNCT_RE.replace(&name, "").to_string();
    name = FILLER_RE.replace_all(&name, "").to_string();
    name = OF_RE.replace_all(&name, "").to_string();
    name = WHITESPACE_RE.replace_all(&name, " ").trim().to_string();

    // Tomaten -> Tomate, Zwiebeln -> Zwiebel, Eiern -> Eier. Complex
    // cases are the categorizer's job.
    if name.chars().count() > 4
        && (name.ends_with("en") || name.ends_with("eln") || name.ends_with("ern"))
    {
        name.pop();
    }

    name
}

/// Parse a free-text ingredient line into (amount, unit, name).
///
/// Examples:
///   "200 g Naturreis"     -> amount=200, unit="gramm", name="naturreis"
///   "2 EL Olivenöl"       -> amount=2, unit="esslöffel", name="olivenöl"
///   "Salz"                -> amount=None, unit=None, name="salz"
///   "2 cloves of garlic"  -> amount=2, unit="zehe", name="garlic"
pub fn parse_ingredient(line: &str) -> ParsedIngredient {
    let original = line.trim().to_string();

    // Parenthetical content is commentary ("(aus der Mühle)").
    let mut text = PARENS_RE.replace_all(&original, "").trim().to_string();

    // "1 x 400g tin" -> "400g tin"
    text = MULTIPLIER_RE.replace_all(&text, "$2").to_string();

    let (amount, unit, name_raw) = match AMOUNT_RE.captures(&text) {
        Some(caps) => {
            let amount: f64 = caps[1].replace(',', ".").parse().unwrap_or(0.0);
            let unit_raw = caps.get(2).map(|m| m.as_str());
            let rest = caps.get(3).map(|m| m.as_str().trim()).unwrap_or("");

            match unit_raw {
                Some(word) => {
                    let normalized = normalize_unit(Some(word)).unwrap_or_default();
                    if is_canonical_unit(&normalized) {
                        if rest.is_empty() {
                            // "2 EL" with nothing behind it: the word was
                            // the whole remainder, treat it as the name.
                            (Some(amount), None, word.to_string())
                        } else {
                            (Some(amount), Some(normalized), rest.to_string())
                        }
                    } else {
                        // "2 Auberginen": the word is part of the name.
                        (Some(amount), None, format!("{word} {rest}").trim().to_string())
                    }
                }
                None => (Some(amount), None, rest.to_string()),
            }
        }
        None => (None, None, text),
    };

    ParsedIngredient {
        original,
        amount,
        unit,
        name: normalize_name(&name_raw),
        base_ingredient: None,
    }
}
