//! Slot assignment, multi-day prep coordination and plan generation.

pub mod assignment;
pub mod generate;
pub mod multi_day;
pub mod search;

pub use assignment::{assign_recipes_to_slots, RECOMMENDATIONS_PER_SLOT, TARGET_FAVORITES_RATIO};
pub use generate::{generate_weekly_plan, next_monday};
pub use search::{build_search_queries, NoSearch, RecipeSearch, SearchQuery, SearchResult};
