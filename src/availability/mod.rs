//! Seasonal calendar and regional shop availability.

pub mod seasonality;
pub mod shop;

pub use seasonality::{is_in_season, out_of_season_ingredients, season_score};
pub use shop::{ingredient_synonyms, ShopAvailability};
