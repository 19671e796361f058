//! Launcher UI layer.
//!
//! The window is a frameless `tao` window holding two `wry` web views:
//! - the button bar, a small local HTML page
//! - the browser, which loads the reference sites
//!
//! Both pages report pointer events over wry IPC so either surface can drag
//! the window. `ipc`, `bar` and `layout` hold the toolkit-independent parts.

pub mod bar;
pub mod ipc;
pub mod layout;

#[cfg(feature = "gui")]
pub mod webview_app;
