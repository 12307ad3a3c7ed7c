use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::plan::Plan;

/// Persisted plan collection, kept behind a trait so the commands that use
/// it can be exercised against an in-memory fake.
pub trait PlanStore {
    /// Load the saved plans. Never fails: a missing or unparsable store
    /// reads as empty.
    fn load(&self) -> Vec<Plan>;

    /// Replace the stored collection wholesale.
    fn save(&self, plans: &[Plan]) -> Result<()>;
}

/// Plans as a single pretty-printed JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlanStore for JsonFileStore {
    fn load(&self) -> Vec<Plan> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    fn save(&self, plans: &[Plan]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("unable to create {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(plans)?;
        fs::write(&self.path, format!("{text}\n"))
            .with_context(|| format!("unable to write plan store {}", self.path.display()))?;
        Ok(())
    }
}

/// Store file location: `--store` wins, then `HOTDISH_STORE`, then the
/// per-user data directory, then the working directory.
pub fn resolve_store_path(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_override {
        return path;
    }
    if let Ok(path) = std::env::var("HOTDISH_STORE") {
        return PathBuf::from(path);
    }
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("hotdish");
    path.push("plans.json");
    path
}

#[cfg(test)]
pub mod fake {
    use std::cell::RefCell;

    use super::*;

    /// In-memory stand-in for the persisted store.
    #[derive(Default)]
    pub struct MemoryStore {
        plans: RefCell<Vec<Plan>>,
    }

    impl PlanStore for MemoryStore {
        fn load(&self) -> Vec<Plan> {
            self.plans.borrow().clone()
        }

        fn save(&self, plans: &[Plan]) -> Result<()> {
            *self.plans.borrow_mut() = plans.to_vec();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use tempfile::tempdir;

    use super::*;
    use crate::plan::{Plan, PlanData, PlanDish};

    fn sample_plan(name: &str) -> Plan {
        let created = Local
            .with_ymd_and_hms(2026, 11, 26, 12, 0, 0)
            .single()
            .expect("valid instant");
        Plan::new(
            name,
            PlanData {
                serve_time: "18:00".to_string(),
                dishes: vec![PlanDish {
                    name: "Turkey".to_string(),
                    prep_minutes: 20,
                    cook_minutes: 180,
                }],
            },
            created,
        )
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("plans.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("plans.json");
        fs::write(&path, "{ not json").expect("write");
        assert!(JsonFileStore::new(path).load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("nested").join("plans.json"));
        let plans = vec![sample_plan("Thanksgiving"), sample_plan("Thanksgiving")];
        store.save(&plans).expect("save");

        let loaded = store.load();
        assert_eq!(loaded, plans);
        // Duplicate names are allowed; order is insertion order.
        assert_eq!(loaded[0].name, loaded[1].name);
    }
}
