use serde::{Deserialize, Serialize};

use super::geometry::Size;
use super::site::{default_sites, Site};

/// Top-level launcher settings, read from `settings.json`.
///
/// Every field has a default so a partial file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LauncherSettings {
    pub window: WindowSettings,
    pub browser: BrowserSettings,
    pub sites: Vec<Site>,
    pub default_site: String,
    pub logging: LoggingSettings,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            browser: BrowserSettings::default(),
            sites: default_sites(),
            default_site: "pqdi".to_string(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Frame and layout of the launcher window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub expanded_size: Size,
    pub collapsed_size: Size,
    /// Height of the button bar strip at the top of the window.
    pub bar_height: u32,
    pub always_on_top: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Project Quarm Database Interface".to_string(),
            expanded_size: Size::new(1000, 600),
            collapsed_size: Size::new(280, 60),
            bar_height: 40,
            always_on_top: true,
        }
    }
}

/// Embedded browser tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrowserSettings {
    pub zoom: f64,
    pub devtools: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            zoom: 0.8,
            devtools: cfg!(debug_assertions),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set, e.g. `info` or `pqdi_launcher=debug`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
