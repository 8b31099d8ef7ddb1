use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),

    #[error("Unknown meal slot: {0}")]
    UnknownSlot(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No weekly plan found. Generate one first with 'generate'.")]
    NoPlan,

    #[error("Slot not found: {0}")]
    SlotNotFound(String),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PlanError {
    /// Input was rejected before any mutation (as opposed to missing state).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PlanError::UnknownWeekday(_)
                | PlanError::UnknownSlot(_)
                | PlanError::InvalidInput(_)
        )
    }

    /// The referenced plan, slot or recipe does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PlanError::NoPlan | PlanError::SlotNotFound(_) | PlanError::RecipeNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
