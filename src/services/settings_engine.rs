// viewerscan Settings Engine
// Loads, validates, updates and persists the scanner settings.
// Settings are stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::Url;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::ScanSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ScanSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ScanSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: ScanSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: ScanSettings::default(),
        }
    }

    /// Replaces the in-memory settings after validating them. Nothing is written.
    pub fn apply(&mut self, settings: ScanSettings) -> Result<(), SettingsError> {
        Self::validate(&settings)?;
        self.settings = settings;
        Ok(())
    }

    /// Checks that the settings describe a runnable scanner.
    pub fn validate(settings: &ScanSettings) -> Result<(), SettingsError> {
        let url = Url::parse(&settings.source.target_url).map_err(|e| {
            SettingsError::InvalidValue(format!(
                "source.target_url '{}': {}",
                settings.source.target_url, e
            ))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SettingsError::InvalidValue(format!(
                "source.target_url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if settings.source.viewer_list_class.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "source.viewer_list_class cannot be empty".to_string(),
            ));
        }

        if settings.source.request_timeout_seconds == 0 {
            return Err(SettingsError::InvalidValue(
                "source.request_timeout_seconds must be positive".to_string(),
            ));
        }

        let interval = settings.polling.update_interval_seconds;
        if !interval.is_finite() || interval <= 0.0 {
            return Err(SettingsError::InvalidValue(format!(
                "polling.update_interval_seconds must be a positive number, got {}",
                interval
            )));
        }
        Duration::try_from_secs_f64(interval).map_err(|e| {
            SettingsError::InvalidValue(format!(
                "polling.update_interval_seconds {}: {}",
                interval, e
            ))
        })?;

        if settings.polling.top_n < 0 {
            return Err(SettingsError::InvalidValue(format!(
                "polling.top_n must be non-negative, got {}",
                settings.polling.top_n
            )));
        }

        Ok(())
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// If the file does not exist, returns default settings.
    /// If the file exists but is malformed or invalid, returns an error.
    fn load(&mut self) -> Result<ScanSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.settings = ScanSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: ScanSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.apply(settings)?;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Updates an individual setting by dot-notation key path and saves.
    ///
    /// # Examples
    /// - `"polling.top_n"` → updates `settings.polling.top_n`
    /// - `"source.page_order"` → updates `settings.source.page_order`
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        let (parents, leaf) = match key.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, key),
        };

        let mut current = &mut json_value;
        for part in parents.into_iter().flat_map(|p| p.split('.')) {
            current = current
                .get_mut(part)
                .ok_or_else(|| SettingsError::InvalidKey(format!("Key '{}' not found in settings", key)))?;
        }

        match current {
            serde_json::Value::Object(map) if map.contains_key(leaf) => {
                map.insert(leaf.to_string(), value);
            }
            serde_json::Value::Object(_) => {
                return Err(SettingsError::InvalidKey(format!(
                    "Key '{}' not found in settings",
                    key
                )));
            }
            _ => {
                return Err(SettingsError::InvalidKey(format!(
                    "Cannot navigate to key '{}': intermediate value is not an object",
                    key
                )));
            }
        }

        let new_settings: ScanSettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;

        self.apply(new_settings)?;
        self.save()
    }

    /// Resets all settings to defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = ScanSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
