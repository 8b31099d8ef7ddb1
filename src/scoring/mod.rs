//! Recipe scoring: preference affinity, time fit, shop availability and
//! seasonality, combined into a 0-100 score with a German explanation.

pub mod scorer;

pub use scorer::{
    calculate_score, generate_reasoning, is_recipe_viable, rating_multiplier,
    recipe_base_ingredients, score_recipes, to_scored_recipe, unobtainable_ingredients,
    ScoreBreakdown, ScoringContext, MIN_OBTAINABLE_RATIO,
};
