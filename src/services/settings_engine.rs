// Sheetmarks Settings Engine
// Manages client settings: loading, saving, updating single values, and resetting to defaults.
// Settings are stored as a JSON file; the two store URLs may also come from the environment.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::types::errors::SettingsError;
use crate::types::settings::ClientSettings;

pub const CONFIG_PATH_ENV: &str = "SHEETMARKS_CONFIG";
pub const RECORD_STORE_URL_ENV: &str = "SHEETMARKS_RECORD_STORE_URL";
pub const SUGGESTION_STORE_URL_ENV: &str = "SHEETMARKS_SUGGESTION_STORE_URL";
const CONFIG_FILE_NAME: &str = "sheetmarks.json";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ClientSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ClientSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: ClientSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise uses `$SHEETMARKS_CONFIG`, falling back to `sheetmarks.json`
    /// next to the running executable.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => default_config_path().to_string_lossy().to_string(),
        };

        Self {
            config_path,
            settings: ClientSettings::default(),
        }
    }

    /// Replaces the store URLs with values found through `lookup`.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(RECORD_STORE_URL_ENV).filter(|u| !u.is_empty()) {
            debug!("record store url overridden by {}", RECORD_STORE_URL_ENV);
            self.settings.record_store_url = url;
        }
        if let Some(url) = lookup(SUGGESTION_STORE_URL_ENV).filter(|u| !u.is_empty()) {
            debug!("suggestion store url overridden by {}", SUGGESTION_STORE_URL_ENV);
            self.settings.suggestion_store_url = url;
        }
    }

    /// Applies `SHEETMARKS_RECORD_STORE_URL` / `SHEETMARKS_SUGGESTION_STORE_URL`.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }
}

fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    match std::env::current_exe() {
        Ok(exe) => exe
            .parent()
            .unwrap_or(Path::new("."))
            .join(CONFIG_FILE_NAME),
        Err(_) => PathBuf::from(CONFIG_FILE_NAME),
    }
}

fn validate(settings: &ClientSettings) -> Result<(), SettingsError> {
    if settings.page_size_options.is_empty() || settings.page_size_options.contains(&0) {
        return Err(SettingsError::InvalidValue(
            "page_size_options must be a non-empty list of positive sizes".to_string(),
        ));
    }
    if !settings.page_size_options.contains(&settings.page_size) {
        return Err(SettingsError::InvalidValue(format!(
            "page_size {} is not one of {:?}",
            settings.page_size, settings.page_size_options
        )));
    }
    Ok(())
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// If the file does not exist, returns default settings.
    /// If the file exists but is malformed, returns a serialization error.
    fn load(&mut self) -> Result<ClientSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.settings = ClientSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: ClientSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        validate(&settings)?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::IoError(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Updates one top-level setting, then saves.
    ///
    /// The new value is validated by deserializing the whole settings object,
    /// so `"page_size": "ten"` is rejected, as is a size outside
    /// `page_size_options`.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        match json_value.get_mut(key) {
            Some(slot) => *slot = value,
            None => {
                return Err(SettingsError::InvalidKey(format!(
                    "Key '{}' not found in settings",
                    key
                )))
            }
        }

        let new_settings: ClientSettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        validate(&new_settings)?;

        self.settings = new_settings;
        self.save()?;

        Ok(())
    }

    /// Resets all settings to defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = ClientSettings::default();
        self.save()?;
        Ok(())
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
