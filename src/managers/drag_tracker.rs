//! Drag-to-move for any draggable surface of the launcher window.
//!
//! Each surface (the button bar, the browser view) owns one [`DragTracker`].
//! A tracker only knows global pointer coordinates and the window position
//! captured at pointer-down; it never touches the window itself. The
//! controller applies the positions it returns.

use serde::{Deserialize, Serialize};

use crate::types::geometry::Point;

/// The parts of the window that accept drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Bar,
    Browser,
}

/// Pointer buttons as reported by the toolkit.
///
/// Numbering follows the DOM `MouseEvent.button` convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(u16),
}

impl PointerButton {
    pub fn from_dom(button: u16) -> Self {
        match button {
            0 => PointerButton::Primary,
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            n => PointerButton::Other(n),
        }
    }
}

/// Anchor of an active drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub anchor_pointer: Point,
    pub anchor_window: Point,
}

impl DragSession {
    /// Window position for the pointer now at `global`.
    pub fn target(&self, global: Point) -> Point {
        self.anchor_window + (global - self.anchor_pointer)
    }
}

#[derive(Debug, Default)]
pub struct DragTracker {
    session: Option<DragSession>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session if `button` is the primary button. Returns whether a session started.
    pub fn on_pointer_down(&mut self, global: Point, window: Point, button: PointerButton) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        self.session = Some(DragSession {
            anchor_pointer: global,
            anchor_window: window,
        });
        true
    }

    /// Returns the position the window should move to, if a drag is in progress
    /// and the primary button is still held.
    pub fn on_pointer_move(&mut self, global: Point, primary_held: bool) -> Option<Point> {
        if !primary_held {
            return None;
        }
        self.session.map(|session| session.target(global))
    }

    /// Ends the session, whichever button was released.
    pub fn on_pointer_up(&mut self) {
        self.session = None;
    }

    /// Ends the session because the surface lost the pointer.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }
}
