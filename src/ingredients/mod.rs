//! Ingredient line parsing, unit normalization and taste categorization.

pub mod categorizer;
pub mod parser;

pub use categorizer::{CachedCategorizer, Categorizer, CategoryEntry};
pub use parser::{normalize_name, normalize_unit, parse_ingredient, unit_class, UnitClass};
