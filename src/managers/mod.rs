// Launcher state managers
// Managers own the launcher's mutable state: drag sessions, browser history, and the window state machine.

pub mod drag_tracker;
pub mod nav_history;
pub mod window_controller;
