//! Persistence: the recipe store, the single-slot plan store and the
//! household config.

pub mod local;
pub mod plan_store;
pub mod store;
pub mod user_config;

pub use local::{LocalStore, StoredRecipe};
pub use plan_store::PlanStore;
pub use store::RecipeStore;
pub use user_config::UserConfig;
