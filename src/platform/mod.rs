// Launcher platform paths
// Resolves where settings and the window-state database live on each OS.

use std::env;
use std::path::PathBuf;

const SETTINGS_FILE: &str = "settings.json";
const DATABASE_FILE: &str = "launcher.db";

#[cfg(target_os = "linux")]
const APP_DIR: &str = "pqdi-launcher";
#[cfg(not(target_os = "linux"))]
const APP_DIR: &str = "PqdiLauncher";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the configuration directory.
///
/// - **Linux**: `$XDG_CONFIG_HOME/pqdi-launcher`, else `~/.config/pqdi-launcher`
/// - **macOS**: `~/Library/Application Support/PqdiLauncher`
/// - **Windows**: `%APPDATA%/PqdiLauncher`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"])
    }
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join(APP_DIR)
    }
    #[cfg(target_os = "windows")]
    {
        appdata_dir()
    }
}

/// Returns the data directory holding the window-state database.
///
/// - **Linux**: `$XDG_DATA_HOME/pqdi-launcher`, else `~/.local/share/pqdi-launcher`
/// - **macOS** and **Windows**: same as the config directory
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        xdg_dir("XDG_DATA_HOME", &[".local", "share"])
    }
    #[cfg(not(target_os = "linux"))]
    {
        get_config_dir()
    }
}

pub fn settings_path() -> PathBuf {
    get_config_dir().join(SETTINGS_FILE)
}

pub fn database_path() -> PathBuf {
    get_data_dir().join(DATABASE_FILE)
}

#[cfg(target_os = "linux")]
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(base) if !base.is_empty() => PathBuf::from(base).join(APP_DIR),
        _ => fallback
            .iter()
            .fold(home_dir(), |path, part| path.join(part))
            .join(APP_DIR),
    }
}

#[cfg(target_os = "windows")]
fn appdata_dir() -> PathBuf {
    env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join("AppData").join("Roaming"))
        .join(APP_DIR)
}
