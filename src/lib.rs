//! PQDI Launcher: a floating, always-on-top button bar that expands into an
//! embedded browser for Project Quarm reference sites.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
pub mod ui;
