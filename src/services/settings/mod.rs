//! Planner settings persistence.
//! Settings live in a single TOML file under the platform config
//! directory; a missing or unreadable file falls back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::PlannerSettings;

const SETTINGS_FILE: &str = "planner.toml";

/// Settings file location under the platform config directory.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "TimelinePlanner", "TimelinePlanner")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

/// Load and validate settings from the given file.
pub fn load(path: &Path) -> Result<PlannerSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings: PlannerSettings = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse settings in {}", path.display()))?;
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings in {}: {}", path.display(), e))?;
    Ok(settings)
}

/// Load settings, falling back to defaults when the file is absent or bad.
pub fn load_or_default(path: &Path) -> PlannerSettings {
    if !path.exists() {
        return PlannerSettings::default();
    }
    match load(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings: {:#}, using defaults", e);
            PlannerSettings::default()
        }
    }
}

/// Write settings to the given file, creating parent directories.
pub fn save(path: &Path, settings: &PlannerSettings) -> Result<()> {
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let raw = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
    fs::write(path, raw)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::{GroupBy, WeekStart};

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.toml");

        let settings = PlannerSettings {
            day_column_px: 24.0,
            snap_threshold: 0.3,
            never_horizon_days: 180,
            group_by: GroupBy::Project,
            week_start: WeekStart::Sunday,
        };
        save(&path, &settings).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("planner.toml");

        save(&path, &PlannerSettings::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert_eq!(load_or_default(&path), PlannerSettings::default());
    }

    #[test]
    fn test_unparseable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.toml");
        fs::write(&path, "snap_threshold = \"not a number\"").unwrap();

        assert_eq!(load_or_default(&path), PlannerSettings::default());
    }

    #[test]
    fn test_load_rejects_out_of_range_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.toml");
        fs::write(&path, "snap_threshold = 3.5").unwrap();

        assert!(load(&path).is_err());
        assert_eq!(load_or_default(&path), PlannerSettings::default());
    }

    #[test]
    fn test_save_rejects_invalid_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.toml");

        let settings = PlannerSettings {
            never_horizon_days: 0,
            ..PlannerSettings::default()
        };
        assert!(save(&path, &settings).is_err());
        assert!(!path.exists());
    }
}
