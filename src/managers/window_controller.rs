//! The launcher window state machine.
//!
//! The controller is driven by [`ControllerEvent`]s and answers with
//! [`UiEffect`]s for the host to apply to the real window and web views.
//! It never calls into the toolkit, which keeps every transition testable
//! without an event loop.
//!
//! ```text
//!   Collapsed --LoadSite--> Expanded --LoadSite--> Expanded
//!   Expanded  --Hide------> Collapsed
//!   any       --Close-----> Terminated
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::managers::drag_tracker::{DragTracker, PointerButton, Surface};
use crate::managers::nav_history::{is_blank, BLANK_URL};
use crate::services::position_store::PositionStore;
use crate::services::site_registry::SiteRegistry;
use crate::types::errors::{LauncherError, Result};
use crate::types::geometry::{Point, Size};
use crate::types::settings::WindowSettings;
use crate::types::window_state::WindowState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Collapsed,
    Expanded,
    Terminated,
}

/// Window sizes for the two visible phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub expanded: Size,
    pub collapsed: Size,
}

impl From<&WindowSettings> for Layout {
    fn from(settings: &WindowSettings) -> Self {
        Self {
            expanded: settings.expanded_size,
            collapsed: settings.collapsed_size,
        }
    }
}

/// Which controls are currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Affordances {
    pub back: bool,
    pub hide: bool,
    pub close: bool,
    pub browser: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// A site button was pressed.
    LoadSite(String),
    Hide,
    Back,
    /// Close button or a close request from the window manager.
    Close,
    /// The browser finished a navigation.
    Navigated { url: String, can_go_back: bool },
    /// The window was moved by something other than a drag (e.g. the window manager).
    WindowMoved(Point),
    PointerDown {
        surface: Surface,
        global: Point,
        window: Point,
        button: PointerButton,
    },
    PointerMove {
        surface: Surface,
        global: Point,
        primary_held: bool,
    },
    PointerUp {
        surface: Surface,
        button: PointerButton,
    },
    /// The surface lost the pointer mid-drag.
    PointerCancel { surface: Surface },
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    Resize(Size),
    MoveTo(Point),
    ShowBrowser(bool),
    LoadUrl(String),
    GoBack,
    SetAffordances(Affordances),
    Exit,
}

pub struct WindowController<S: PositionStore> {
    state: WindowState,
    phase: Phase,
    back_visible: bool,
    started: bool,
    registry: SiteRegistry,
    layout: Layout,
    store: S,
    bar_drag: DragTracker,
    browser_drag: DragTracker,
}

impl<S: PositionStore> WindowController<S> {
    pub fn new(registry: SiteRegistry, layout: Layout, store: S) -> Self {
        Self {
            state: WindowState::default(),
            phase: Phase::Collapsed,
            back_visible: false,
            started: false,
            registry,
            layout,
            store,
            bar_drag: DragTracker::new(),
            browser_drag: DragTracker::new(),
        }
    }

    /// Loads the persisted state and returns the effects that restore it.
    ///
    /// An expanded record replays the site load with the saved URL, or the
    /// default site when none was saved. Calling `start` again is a no-op.
    pub fn start(&mut self) -> Vec<UiEffect> {
        if self.started {
            return Vec::new();
        }
        self.started = true;

        let mut loaded = match self.store.load() {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "could not load window state, starting collapsed");
                WindowState::default()
            }
        };
        if !loaded.expanded {
            loaded.current_url = None;
        }
        info!(?loaded, "restoring window state");

        self.state.position = loaded.position;

        let mut effects = Vec::new();
        if let Some(pos) = loaded.position {
            effects.push(UiEffect::MoveTo(pos));
        }
        effects.push(UiEffect::Resize(self.layout.collapsed));
        effects.push(UiEffect::ShowBrowser(false));
        effects.push(UiEffect::SetAffordances(self.affordances()));

        if loaded.expanded {
            let url = loaded
                .current_url
                .unwrap_or_else(|| self.registry.default_site().url.clone());
            effects.extend(self.expand_to(url));
        }
        effects
    }

    pub fn handle(&mut self, event: ControllerEvent) -> Result<Vec<UiEffect>> {
        if self.phase == Phase::Terminated {
            return Err(LauncherError::Terminated);
        }

        let effects = match event {
            ControllerEvent::LoadSite(id) => {
                let url = self.registry.resolve(&id)?.to_string();
                debug!(site = %id, %url, "load site");
                match self.phase {
                    Phase::Collapsed => self.expand_to(url),
                    _ => {
                        self.state.current_url = Some(url.clone());
                        self.persist();
                        vec![UiEffect::LoadUrl(url)]
                    }
                }
            }

            ControllerEvent::Hide => match self.phase {
                Phase::Expanded => self.collapse(),
                _ => Vec::new(),
            },

            ControllerEvent::Back => {
                if self.phase == Phase::Expanded && self.back_visible {
                    vec![UiEffect::GoBack]
                } else {
                    Vec::new()
                }
            }

            ControllerEvent::Close => {
                info!(state = ?self.state, "closing launcher");
                self.persist();
                self.phase = Phase::Terminated;
                vec![UiEffect::Exit]
            }

            ControllerEvent::Navigated { url, can_go_back } => {
                debug!(%url, can_go_back, "navigated");
                self.back_visible = can_go_back;
                if self.phase == Phase::Expanded && !is_blank(&url) {
                    self.state.current_url = Some(url);
                }
                self.persist();
                vec![UiEffect::SetAffordances(self.affordances())]
            }

            ControllerEvent::WindowMoved(pos) => {
                if self.state.position != Some(pos) {
                    self.state.position = Some(pos);
                    self.persist();
                }
                Vec::new()
            }

            ControllerEvent::PointerDown {
                surface,
                global,
                window,
                button,
            } => {
                self.tracker(surface).on_pointer_down(global, window, button);
                Vec::new()
            }

            ControllerEvent::PointerMove {
                surface,
                global,
                primary_held,
            } => {
                let target = self.tracker(surface).on_pointer_move(global, primary_held);
                match target {
                    Some(target) => {
                        self.state.position = Some(target);
                        self.persist();
                        vec![UiEffect::MoveTo(target)]
                    }
                    None => Vec::new(),
                }
            }

            ControllerEvent::PointerUp { surface, .. } => {
                self.tracker(surface).on_pointer_up();
                Vec::new()
            }

            ControllerEvent::PointerCancel { surface } => {
                self.tracker(surface).cancel();
                Vec::new()
            }
        };

        Ok(effects)
    }

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_dragging(&self, surface: Surface) -> bool {
        match surface {
            Surface::Bar => self.bar_drag.is_dragging(),
            Surface::Browser => self.browser_drag.is_dragging(),
        }
    }

    /// Controls to show for the current phase. The back button only shows
    /// while expanded, even if the browser still reports history.
    pub fn affordances(&self) -> Affordances {
        let expanded = self.phase == Phase::Expanded;
        Affordances {
            back: expanded && self.back_visible,
            hide: expanded,
            close: !expanded,
            browser: expanded,
        }
    }

    fn tracker(&mut self, surface: Surface) -> &mut DragTracker {
        match surface {
            Surface::Bar => &mut self.bar_drag,
            Surface::Browser => &mut self.browser_drag,
        }
    }

    fn expand_to(&mut self, url: String) -> Vec<UiEffect> {
        self.phase = Phase::Expanded;
        self.back_visible = false;
        self.state.expanded = true;
        self.state.current_url = Some(url.clone());
        self.persist();

        vec![
            UiEffect::Resize(self.layout.expanded),
            UiEffect::ShowBrowser(true),
            UiEffect::LoadUrl(url),
            UiEffect::SetAffordances(self.affordances()),
        ]
    }

    fn collapse(&mut self) -> Vec<UiEffect> {
        self.phase = Phase::Collapsed;
        self.back_visible = false;
        self.state.expanded = false;
        self.state.current_url = None;
        self.browser_drag.cancel();
        self.persist();

        vec![
            UiEffect::LoadUrl(BLANK_URL.to_string()),
            UiEffect::ShowBrowser(false),
            UiEffect::Resize(self.layout.collapsed),
            UiEffect::SetAffordances(self.affordances()),
        ]
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.state) {
            warn!(error = %e, "skipping window state save");
        }
    }
}
