// Launcher services
// Services back the window controller: the site table, the persisted window record, and settings.

pub mod position_store;
pub mod settings_engine;
pub mod site_registry;
