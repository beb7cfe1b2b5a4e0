//! Saved-plan persistence
//!
//! Plans are stored as one pretty-printed JSON file per city under a plans
//! directory, wrapped in a versioned save record. Updates are whole-record
//! replacement; there is no partial rewrite of a stored plan.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::plan::{slugify, UrbanPlan};

const SAVE_VERSION: u32 = 1;
const PLAN_PREFIX: &str = "urban-plan-";

/// Versioned wrapper around a stored plan.
#[derive(Serialize, Deserialize)]
struct PlanSaveFile {
    /// Format version for forward compatibility
    version: u32,
    /// Local time the plan was saved, RFC 3339
    saved_at: String,
    plan: UrbanPlan,
}

/// Directory-backed store of named plans.
pub struct PlanStore {
    dir: PathBuf,
}

impl PlanStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PlanStore { dir: dir.into() }
    }

    /// Default location: a `plans` directory next to the binary's cwd.
    pub fn default_dir() -> PathBuf {
        PathBuf::from("plans")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn plan_path(&self, city_name: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}.json", PLAN_PREFIX, slugify(city_name)))
    }

    /// Save a plan, replacing any existing record with the same city name.
    pub fn save(&self, plan: &UrbanPlan) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let record = PlanSaveFile {
            version: SAVE_VERSION,
            saved_at: Local::now().to_rfc3339(),
            plan: plan.clone(),
        };
        let json = serde_json::to_string_pretty(&record).map_err(|e| {
            io::Error::new(io::ErrorKind::Other, format!("Serialization failed: {}", e))
        })?;

        let path = self.plan_path(&plan.city_name);
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Load a plan by city name.
    pub fn load(&self, city_name: &str) -> io::Result<UrbanPlan> {
        let path = self.plan_path(city_name);
        let json = fs::read_to_string(&path)?;
        let record: PlanSaveFile = serde_json::from_str(&json).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Deserialization failed: {}", e),
            )
        })?;
        if record.version > SAVE_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Save file version {} is newer than supported", record.version),
            ));
        }
        Ok(record.plan)
    }

    /// Delete a stored plan by city name.
    pub fn delete(&self, city_name: &str) -> io::Result<()> {
        fs::remove_file(self.plan_path(city_name))
    }

    /// List all stored plans, sorted by city name.
    ///
    /// Unreadable or corrupt records are reported and skipped rather than
    /// failing the whole listing.
    pub fn list(&self) -> io::Result<Vec<UrbanPlan>> {
        let mut plans = Vec::new();
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(plans),
            Err(e) => return Err(e),
        };

        for entry in entries {
            let path = entry?.path();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if !name.starts_with(PLAN_PREFIX) || !name.ends_with(".json") {
                continue;
            }
            match fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| {
                    serde_json::from_str::<PlanSaveFile>(&json).map_err(|e| e.to_string())
                }) {
                Ok(record) => plans.push(record.plan),
                Err(e) => {
                    eprintln!("Failed to read saved plan {}: {}", path.display(), e);
                }
            }
        }

        plans.sort_by(|a, b| a.city_name.cmp(&b.city_name));
        Ok(plans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ControlSettings;
    use serde_json::json;

    fn test_store(name: &str) -> PlanStore {
        let dir = std::env::temp_dir().join(format!("urban-planner-store-{}", name));
        let _ = fs::remove_dir_all(&dir);
        PlanStore::new(dir)
    }

    fn plan_named(city: &str) -> UrbanPlan {
        let settings = ControlSettings {
            city_name: city.to_string(),
            ..ControlSettings::default()
        };
        UrbanPlan::from_response(
            &json!({ "layoutGrid": [[{ "landUse": "park", "density": 0.5 }]] }),
            &settings,
            2,
        )
    }

    #[test]
    fn test_save_load_round_trip() {
        let store = test_store("round-trip");
        let plan = plan_named("Vireo Heights");
        let path = store.save(&plan).unwrap();
        assert!(path.ends_with("urban-plan-vireo-heights.json"));

        let loaded = store.load("Vireo Heights").unwrap();
        assert_eq!(loaded.city_name, plan.city_name);
        assert_eq!(loaded.layout_grid, plan.layout_grid);
    }

    #[test]
    fn test_list_sorted_and_skips_garbage() {
        let store = test_store("list");
        store.save(&plan_named("Zephyr")).unwrap();
        store.save(&plan_named("Aethelgard")).unwrap();
        fs::write(store.dir().join("urban-plan-broken.json"), "not json").unwrap();
        fs::write(store.dir().join("notes.txt"), "ignored").unwrap();

        let plans = store.list().unwrap();
        let names: Vec<&str> = plans.iter().map(|p| p.city_name.as_str()).collect();
        assert_eq!(names, vec!["Aethelgard", "Zephyr"]);
    }

    #[test]
    fn test_list_on_missing_dir_is_empty() {
        let store = test_store("missing");
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let store = test_store("delete");
        store.save(&plan_named("Gone City")).unwrap();
        store.delete("Gone City").unwrap();
        assert!(store.load("Gone City").is_err());
        assert!(store.delete("Gone City").is_err());
    }

    #[test]
    fn test_save_replaces_whole_record() {
        let store = test_store("replace");
        store.save(&plan_named("Twin")).unwrap();
        let mut updated = plan_named("Twin");
        updated.description = "second generation".to_string();
        store.save(&updated).unwrap();

        let plans = store.list().unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].description, "second generation");
    }
}
