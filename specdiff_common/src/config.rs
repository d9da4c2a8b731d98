use crate::SpecDiffError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "specdiff.toml";

/// Persisted application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Skip summary, description and title fields when comparing
    #[serde(default)]
    pub exclude_descriptions: bool,

    /// Skip example values when comparing
    #[serde(default)]
    pub exclude_examples: bool,

    /// Endpoint filter applied to every diff unless overridden
    #[serde(default)]
    pub endpoint_filter: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: PathBuf,
    pub exists: bool,
}

pub fn load_config() -> Result<LoadedConfig, SpecDiffError> {
    let path = config_path()?;
    let exists = path.exists();

    let config = if exists {
        let data = fs::read_to_string(&path)?;
        toml::from_str(&data).map_err(|e| SpecDiffError::Serialization(e.to_string()))?
    } else {
        AppConfig::default()
    };

    Ok(LoadedConfig {
        config,
        path,
        exists,
    })
}

pub fn save_config(path: &Path, config: &AppConfig) -> Result<(), SpecDiffError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let data = toml::to_string_pretty(config)
        .map_err(|e| SpecDiffError::Serialization(e.to_string()))?;
    fs::write(path, data)?;
    Ok(())
}

fn config_path() -> Result<PathBuf, SpecDiffError> {
    let dirs = ProjectDirs::from("", "specdiff", "specdiff")
        .ok_or_else(|| SpecDiffError::Config("Unable to determine config directory".to_string()))?;
    Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(!config.exclude_descriptions);
        assert!(!config.exclude_examples);
        assert!(config.endpoint_filter.is_none());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = AppConfig {
            exclude_descriptions: true,
            exclude_examples: false,
            endpoint_filter: Some("^GET /pets".to_string()),
        };
        save_config(&path, &config).unwrap();

        let data = fs::read_to_string(&path).unwrap();
        let reloaded: AppConfig = toml::from_str(&data).unwrap();
        assert!(reloaded.exclude_descriptions);
        assert!(!reloaded.exclude_examples);
        assert_eq!(reloaded.endpoint_filter.as_deref(), Some("^GET /pets"));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let reloaded: AppConfig = toml::from_str("exclude_examples = true\n").unwrap();
        assert!(!reloaded.exclude_descriptions);
        assert!(reloaded.exclude_examples);
        assert!(reloaded.endpoint_filter.is_none());
    }
}
