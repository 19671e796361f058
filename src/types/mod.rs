// PQDI Launcher shared type definitions
// Each submodule defines plain data used across the application.

pub mod errors;
pub mod geometry;
pub mod settings;
pub mod site;
pub mod window_state;
