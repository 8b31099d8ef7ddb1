use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PlanError, Result};
use crate::models::WeeklyPlan;

pub const PLAN_FILE: &str = "weekly_plan.json";

/// Single-slot persistence for the current weekly plan.
///
/// One active plan at a time: saving replaces, deleting removes. Mutation
/// sequences are load, mutate, save under the caller's single-writer
/// discipline.
#[derive(Debug, Clone)]
pub struct PlanStore {
    path: PathBuf,
}

impl PlanStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join(PLAN_FILE),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the current plan. [`PlanError::NoPlan`] when none exists.
    ///
    /// The per-slot multi-day views are rebuilt from the groups, so a
    /// hand-edited plan file cannot leave them out of sync.
    pub fn load(&self) -> Result<WeeklyPlan> {
        if !self.path.exists() {
            return Err(PlanError::NoPlan);
        }
        let content = fs::read_to_string(&self.path)?;
        let mut plan: WeeklyPlan = serde_json::from_str(&content)?;
        plan.sync_multi_day_views();
        Ok(plan)
    }

    pub fn save(&self, plan: &WeeklyPlan) -> Result<()> {
        let json = serde_json::to_string_pretty(plan)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Delete the current plan. [`PlanError::NoPlan`] when none exists.
    pub fn delete(&self) -> Result<()> {
        if !self.path.exists() {
            return Err(PlanError::NoPlan);
        }
        fs::remove_file(&self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SlotKey, SlotRecommendation};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_plan() -> WeeklyPlan {
        let slots = SlotKey::week()
            .into_iter()
            .map(|key| SlotRecommendation::new(key, Vec::new()))
            .collect();
        WeeklyPlan::new(NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(), slots)
    }

    #[test]
    fn test_load_without_plan_is_no_plan() {
        let dir = TempDir::new().unwrap();
        let store = PlanStore::new(dir.path());
        assert!(!store.exists());
        assert!(matches!(store.load(), Err(PlanError::NoPlan)));
        assert!(matches!(store.delete(), Err(PlanError::NoPlan)));
    }

    #[test]
    fn test_save_load_delete_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = PlanStore::new(dir.path());

        let plan = sample_plan();
        store.save(&plan).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded.week_start, plan.week_start);
        assert_eq!(loaded.slots.len(), 14);

        store.delete().unwrap();
        assert!(!store.exists());
    }
}
