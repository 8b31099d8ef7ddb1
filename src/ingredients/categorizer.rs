use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One cached categorization entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name_normalized: String,
    /// Taste category. Specific, not generic: "kirschtomate" maps to
    /// "tomate", but "salz" stays "salz".
    pub base_ingredient: String,
}

/// Assigns taste categories to normalized ingredient names.
///
/// The categorizer is a pluggable seam: production wires in a cache built
/// from a curated file, tests use small hand-built maps.
pub trait Categorizer {
    /// Taste category for `name`, or `None` if unknown.
    fn base_ingredient(&self, name: &str) -> Option<String>;
}

/// A categorizer backed by a pre-computed lookup table.
///
/// Unknown ingredients fall back to their own name as category, so a
/// missing or partial table degrades gracefully instead of failing.
#[derive(Debug, Clone, Default)]
pub struct CachedCategorizer {
    cache: HashMap<String, CategoryEntry>,
}

impl CachedCategorizer {
    pub fn new(cache: HashMap<String, CategoryEntry>) -> Self {
        Self { cache }
    }

    /// Category with fallback: the name itself when the table has no entry.
    pub fn category_or_self(&self, name: &str) -> String {
        self.base_ingredient(name)
            .unwrap_or_else(|| name.to_string())
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Categorizer for CachedCategorizer {
    fn base_ingredient(&self, name: &str) -> Option<String> {
        self.cache.get(name).map(|e| e.base_ingredient.clone())
    }
}
