pub mod availability;
pub mod cli;
pub mod error;
pub mod ingredients;
pub mod interface;
pub mod models;
pub mod planner;
pub mod scoring;
pub mod shopping;
pub mod state;

pub use error::{PlanError, Result};
pub use models::{Recipe, ScoredRecipe, SlotKey, WeeklyPlan};
