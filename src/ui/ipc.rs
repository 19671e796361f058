//! Messages posted by the web views through `window.ipc.postMessage`.

use serde::Deserialize;

use crate::managers::drag_tracker::{PointerButton, Surface};
use crate::managers::window_controller::ControllerEvent;
use crate::types::errors::{LauncherError, Result};
use crate::types::geometry::Point;

/// DOM `MouseEvent.buttons` bit for the primary button.
const PRIMARY_BUTTON_MASK: u16 = 1;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum IpcMessage {
    /// The bar page finished loading.
    Ready,
    LoadSite { id: String },
    Hide,
    Back,
    Close,
    PointerDown { x: f64, y: f64, button: u16 },
    PointerMove { x: f64, y: f64, buttons: u16 },
    PointerUp { button: u16 },
    PointerCancel,
    /// Same-document navigation in the browser view.
    UrlChanged {
        url: String,
        #[serde(default)]
        replace: bool,
    },
}

impl IpcMessage {
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| LauncherError::Ipc(e.to_string()))
    }

    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            IpcMessage::PointerDown { .. }
                | IpcMessage::PointerMove { .. }
                | IpcMessage::PointerUp { .. }
                | IpcMessage::PointerCancel
        )
    }

    /// The browser surface hosts third-party pages, so it may only report
    /// pointer activity and its own URL changes.
    pub fn accepted_from(&self, surface: Surface) -> bool {
        match surface {
            Surface::Bar => !matches!(self, IpcMessage::UrlChanged { .. }),
            Surface::Browser => self.is_pointer() || matches!(self, IpcMessage::UrlChanged { .. }),
        }
    }

    /// Converts the message into a controller event.
    ///
    /// `window` is the window's current outer position, recorded as the drag
    /// anchor on pointer-down. `Ready` and `UrlChanged` have no direct event:
    /// the host answers them from its own state.
    pub fn into_event(self, surface: Surface, window: Point) -> Option<ControllerEvent> {
        if !self.accepted_from(surface) {
            return None;
        }

        let event = match self {
            IpcMessage::Ready | IpcMessage::UrlChanged { .. } => return None,
            IpcMessage::LoadSite { id } => ControllerEvent::LoadSite(id),
            IpcMessage::Hide => ControllerEvent::Hide,
            IpcMessage::Back => ControllerEvent::Back,
            IpcMessage::Close => ControllerEvent::Close,
            IpcMessage::PointerDown { x, y, button } => ControllerEvent::PointerDown {
                surface,
                global: screen_point(x, y),
                window,
                button: PointerButton::from_dom(button),
            },
            IpcMessage::PointerMove { x, y, buttons } => ControllerEvent::PointerMove {
                surface,
                global: screen_point(x, y),
                primary_held: buttons & PRIMARY_BUTTON_MASK != 0,
            },
            IpcMessage::PointerUp { button } => ControllerEvent::PointerUp {
                surface,
                button: PointerButton::from_dom(button),
            },
            IpcMessage::PointerCancel => ControllerEvent::PointerCancel { surface },
        };
        Some(event)
    }
}

fn screen_point(x: f64, y: f64) -> Point {
    Point::new(x.round() as i32, y.round() as i32)
}
