pub mod ingredient;
pub mod plan;
pub mod profile;
pub mod recipe;

pub use ingredient::ParsedIngredient;
pub use plan::{
    MealSlot, MultiDayGroup, SlotGroup, SlotKey, SlotRecommendation, Weekday, WeeklyPlan,
};
pub use profile::PreferenceProfile;
pub use recipe::{Recipe, ScoredRecipe};
