// Launcher Settings Engine
// Loads and saves launcher settings as a JSON file at the platform config path.
// The file is optional; a missing file means built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::platform;
use crate::services::site_registry::SiteRegistry;
use crate::types::errors::{LauncherError, Result};
use crate::types::settings::LauncherSettings;

const MIN_ZOOM: f64 = 0.25;
const MAX_ZOOM: f64 = 5.0;

pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<LauncherSettings>;
    fn save(&self) -> Result<()>;
    fn get_settings(&self) -> &LauncherSettings;
    fn set_settings(&mut self, settings: LauncherSettings) -> Result<()>;
    fn reset(&mut self) -> Result<()>;
    fn get_config_path(&self) -> &Path;
}

/// Settings engine persisting [`LauncherSettings`] as pretty-printed JSON.
pub struct SettingsEngine {
    config_path: PathBuf,
    settings: LauncherSettings,
}

impl SettingsEngine {
    /// Uses `path_override` when given, otherwise `settings.json` in the platform config dir.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        Self {
            config_path: path_override.unwrap_or_else(platform::settings_path),
            settings: LauncherSettings::default(),
        }
    }

    /// Builds the site registry described by the current settings.
    pub fn site_registry(&self) -> Result<SiteRegistry> {
        SiteRegistry::from_sites(self.settings.sites.clone(), &self.settings.default_site)
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from disk.
    ///
    /// A missing file yields defaults. A malformed or invalid file is an
    /// error and leaves the in-memory settings at their previous value.
    fn load(&mut self) -> Result<LauncherSettings> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no settings file, using defaults");
            self.settings = LauncherSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| LauncherError::Settings(format!("Failed to read config file: {}", e)))?;

        let settings: LauncherSettings = serde_json::from_str(&content)
            .map_err(|e| LauncherError::Settings(format!("Failed to parse config file: {}", e)))?;

        validate(&settings)?;

        info!(path = %self.config_path.display(), "settings loaded");
        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Writes the current settings, creating the config directory if needed.
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LauncherError::Settings(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.config_path, json)
            .map_err(|e| LauncherError::Settings(format!("Failed to write config file: {}", e)))?;
        Ok(())
    }

    fn get_settings(&self) -> &LauncherSettings {
        &self.settings
    }

    /// Replaces the settings in memory after validating them. Call `save` to persist.
    fn set_settings(&mut self, settings: LauncherSettings) -> Result<()> {
        validate(&settings)?;
        self.settings = settings;
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.settings = LauncherSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Checks the constraints serde cannot express.
pub fn validate(settings: &LauncherSettings) -> Result<()> {
    let window = &settings.window;
    if window.expanded_size.is_empty() || window.collapsed_size.is_empty() {
        return Err(LauncherError::Settings("window sizes must be non-zero".to_string()));
    }
    if window.bar_height == 0 || window.bar_height >= window.expanded_size.height {
        return Err(LauncherError::Settings(format!(
            "bar_height {} must be between 1 and the expanded height {}",
            window.bar_height, window.expanded_size.height
        )));
    }
    let zoom = settings.browser.zoom;
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        return Err(LauncherError::Settings(format!(
            "zoom {} outside {}..={}",
            zoom, MIN_ZOOM, MAX_ZOOM
        )));
    }
    SiteRegistry::from_sites(settings.sites.clone(), &settings.default_site)
        .map_err(|e| LauncherError::Settings(e.to_string()))?;
    Ok(())
}
