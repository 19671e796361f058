//! App Core for the launcher.
//!
//! Opens the window-state store and builds the controller. Nothing here can
//! fail the process: an unusable database falls back to an in-memory store
//! and an invalid site table falls back to the built-in sites.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::database::Database;
use crate::managers::window_controller::{ControllerEvent, Layout, UiEffect, WindowController};
use crate::platform;
use crate::services::position_store::{MemoryPositionStore, PositionStore, SqlitePositionStore};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::site_registry::SiteRegistry;
use crate::types::errors::Result;
use crate::types::settings::LauncherSettings;

/// Store type used by the running application.
pub type DynStore = Box<dyn PositionStore>;

/// Where the app reads its settings and keeps its database.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub settings: PathBuf,
    pub database: PathBuf,
}

impl Default for AppPaths {
    fn default() -> Self {
        Self {
            settings: platform::settings_path(),
            database: platform::database_path(),
        }
    }
}

pub struct App<S: PositionStore = DynStore> {
    pub settings: LauncherSettings,
    pub controller: WindowController<S>,
}

impl App<DynStore> {
    /// Opens the app with the SQLite window store at `paths.database`.
    pub fn open(settings: LauncherSettings, paths: &AppPaths) -> Self {
        let store = open_store(paths);
        App::with_store(settings, store)
    }
}

impl<S: PositionStore> App<S> {
    /// Builds the app around an explicit store. Invalid site tables fall back to the defaults.
    pub fn with_store(settings: LauncherSettings, store: S) -> Self {
        let registry = SiteRegistry::from_sites(settings.sites.clone(), &settings.default_site)
            .unwrap_or_else(|e| {
                warn!(error = %e, "invalid site table, using built-in sites");
                SiteRegistry::default()
            });
        let layout = Layout::from(&settings.window);
        Self {
            controller: WindowController::new(registry, layout, store),
            settings,
        }
    }

    /// Startup sequence: restore the persisted window and return the effects to apply before showing it.
    pub fn startup(&mut self) -> Vec<UiEffect> {
        info!(version = env!("CARGO_PKG_VERSION"), "launcher starting");
        self.controller.start()
    }

    /// Feeds one event to the controller. Rejected actions are logged and produce no effects.
    pub fn dispatch(&mut self, event: ControllerEvent) -> Vec<UiEffect> {
        match self.controller.handle(event) {
            Ok(effects) => effects,
            Err(e) => {
                error!(error = %e, "action rejected");
                Vec::new()
            }
        }
    }

    /// Shutdown sequence: final synchronous save of the window state.
    pub fn shutdown(&mut self) -> Vec<UiEffect> {
        self.dispatch(ControllerEvent::Close)
    }
}

/// Reads `paths.settings`. Callers fall back to defaults on error.
pub fn read_settings(paths: &AppPaths) -> Result<LauncherSettings> {
    SettingsEngine::new(Some(paths.settings.clone())).load()
}

fn open_store(paths: &AppPaths) -> DynStore {
    if let Some(parent) = paths.database.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!(error = %e, dir = %parent.display(), "cannot create data directory");
        }
    }
    match Database::open(&paths.database) {
        Ok(db) => Box::new(SqlitePositionStore::new(db)),
        Err(e) => {
            warn!(error = %e, "window state will not persist this session");
            Box::new(MemoryPositionStore::new())
        }
    }
}
