//! The launcher window using `wry` + `tao`.
//!
//! Architecture:
//! - One frameless, always-on-top `tao` window, hidden until the persisted
//!   state has been applied.
//! - The bar web view renders local HTML (`bar::bar_html`) and posts button
//!   clicks and pointer events over IPC.
//! - The browser web view loads the sites. The drag and URL-change scripts are
//!   injected with `with_initialization_script`, so they run on every page it
//!   shows. Popups (`target=_blank`) open in the same view.
//! - On Linux both views sit in a `gtk::Fixed`, the only GTK parent in which
//!   wry honors `set_bounds`.
//! - IPC and page-load callbacks only forward a `UserEvent` through the event
//!   loop proxy. The `App` lives inside the event loop closure, so every
//!   transition runs on the UI thread.

use tao::dpi::{LogicalPosition, LogicalSize};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tao::window::{Window, WindowBuilder};
use tracing::{debug, info, warn};
use wry::{PageLoadEvent, Rect, WebView, WebViewBuilder};

use crate::app::{read_settings, App, AppPaths};
use crate::logging::{self, LogConfig};
use crate::managers::drag_tracker::Surface;
use crate::managers::nav_history::{is_blank, is_web_url, NavHistory, BLANK_URL};
use crate::managers::window_controller::{ControllerEvent, Phase, UiEffect};
use crate::types::geometry::{Point, Size};
use crate::types::settings::LauncherSettings;
use crate::ui::bar;
use crate::ui::ipc::IpcMessage;
use crate::ui::layout::{self, Pane};

#[derive(Debug)]
enum UserEvent {
    Ipc(Surface, String),
    PageLoaded(String),
    /// The page asked for a new window.
    OpenUrl(String),
}

/// The live window and its two web views.
struct Host {
    window: Window,
    bar: WebView,
    browser: WebView,
    history: NavHistory,
    size: Size,
    bar_height: u32,
    browser_visible: bool,
}

impl Host {
    fn window_position(&self) -> Point {
        match self.window.outer_position() {
            Ok(pos) => {
                let logical: LogicalPosition<i32> = pos.to_logical(self.window.scale_factor());
                Point::new(logical.x, logical.y)
            }
            Err(e) => {
                warn!(error = %e, "outer position unavailable");
                Point::default()
            }
        }
    }

    fn apply(&mut self, effects: Vec<UiEffect>, control_flow: &mut ControlFlow) {
        for effect in effects {
            debug!(?effect, "apply");
            match effect {
                UiEffect::Resize(size) => {
                    self.size = size;
                    self.window
                        .set_inner_size(LogicalSize::new(size.width as f64, size.height as f64));
                    self.relayout();
                }
                UiEffect::MoveTo(pos) => {
                    self.window.set_outer_position(LogicalPosition::new(pos.x, pos.y));
                }
                UiEffect::ShowBrowser(visible) => {
                    self.browser_visible = visible;
                    if let Err(e) = self.browser.set_visible(visible) {
                        warn!(error = %e, "cannot change browser visibility");
                    }
                    self.relayout();
                }
                UiEffect::LoadUrl(url) => {
                    if is_blank(&url) {
                        self.history.reset();
                    }
                    if let Err(e) = self.browser.load_url(&url) {
                        warn!(error = %e, %url, "load failed");
                    }
                }
                UiEffect::GoBack => {
                    if self.history.go_back() {
                        if let Err(e) = self.browser.evaluate_script("history.back()") {
                            warn!(error = %e, "back navigation failed");
                            self.history.reset();
                        }
                    }
                }
                UiEffect::SetAffordances(affordances) => {
                    let script = bar::apply_affordances_script(&affordances);
                    if let Err(e) = self.bar.evaluate_script(&script) {
                        warn!(error = %e, "cannot update bar");
                    }
                }
                UiEffect::Exit => {
                    *control_flow = ControlFlow::Exit;
                }
            }
        }
    }

    fn relayout(&self) {
        let (bar_rect, browser_rect) = layout_rects(self.size, self.bar_height, self.browser_visible);
        if let Err(e) = self.bar.set_bounds(bar_rect) {
            warn!(error = %e, "cannot place bar");
        }
        if let Err(e) = self.browser.set_bounds(browser_rect) {
            warn!(error = %e, "cannot place browser");
        }
    }
}

fn layout_rects(size: Size, bar_height: u32, browser_visible: bool) -> (Rect, Rect) {
    let (bar, browser) = layout::split(size, bar_height, browser_visible);
    (to_rect(bar), to_rect(browser))
}

fn to_rect(pane: Pane) -> Rect {
    Rect {
        position: wry::dpi::LogicalPosition::new(pane.origin.x, pane.origin.y).into(),
        size: wry::dpi::LogicalSize::new(pane.size.width, pane.size.height).into(),
    }
}

// ─── Main entry point ───

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let paths = AppPaths::default();
    let settings_result = read_settings(&paths);
    let settings = settings_result.as_ref().cloned().unwrap_or_default();

    logging::init_logging(LogConfig::from(&settings.logging));
    if let Err(e) = &settings_result {
        warn!(error = %e, path = %paths.settings.display(), "using default settings");
    }

    let app = App::open(settings, &paths);
    launch(app)
}

fn launch(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    let settings: LauncherSettings = app.settings.clone();
    let collapsed = settings.window.collapsed_size;

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(&settings.window.title)
        .with_decorations(false)
        .with_always_on_top(settings.window.always_on_top)
        .with_transparent(true)
        .with_resizable(false)
        .with_visible(false)
        .with_inner_size(LogicalSize::new(collapsed.width as f64, collapsed.height as f64))
        .build(&event_loop)?;

    let (bar_rect, browser_rect) = layout_rects(collapsed, settings.window.bar_height, false);

    let bar_proxy = proxy.clone();
    let bar_builder = WebViewBuilder::new()
        .with_transparent(true)
        .with_html(bar::bar_html(app.controller.registry(), app.controller.affordances()))
        .with_bounds(bar_rect)
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let _ = bar_proxy.send_event(UserEvent::Ipc(Surface::Bar, msg.into_body()));
        });

    let ipc_proxy = proxy.clone();
    let load_proxy = proxy.clone();
    let popup_proxy = proxy.clone();
    let browser_script = bar::browser_init_script();
    let browser_builder = WebViewBuilder::new()
        .with_url(BLANK_URL)
        .with_visible(false)
        .with_bounds(browser_rect)
        .with_initialization_script(&browser_script)
        .with_devtools(settings.browser.devtools)
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let _ = ipc_proxy.send_event(UserEvent::Ipc(Surface::Browser, msg.into_body()));
        })
        .with_on_page_load_handler(move |event, url| {
            if let PageLoadEvent::Finished = event {
                let _ = load_proxy.send_event(UserEvent::PageLoaded(url));
            }
        })
        .with_new_window_req_handler(move |url, _features| {
            if is_web_url(&url) {
                let _ = popup_proxy.send_event(UserEvent::OpenUrl(url));
            }
            wry::NewWindowResponse::Deny
        });

    #[cfg(target_os = "linux")]
    let (bar_view, browser_view) = {
        use gtk::prelude::*;
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().ok_or("GTK vbox unavailable")?;
        let fixed = gtk::Fixed::new();
        vbox.pack_start(&fixed, true, true, 0);
        fixed.show_all();
        (bar_builder.build_gtk(&fixed)?, browser_builder.build_gtk(&fixed)?)
    };

    #[cfg(not(target_os = "linux"))]
    let (bar_view, browser_view) = (
        bar_builder.build_as_child(&window)?,
        browser_builder.build_as_child(&window)?,
    );

    if let Err(e) = browser_view.zoom(settings.browser.zoom) {
        warn!(error = %e, "zoom not applied");
    }

    let mut host = Host {
        window,
        bar: bar_view,
        browser: browser_view,
        history: NavHistory::new(),
        size: collapsed,
        bar_height: settings.window.bar_height,
        browser_visible: false,
    };

    let mut startup_flow = ControlFlow::Wait;
    let effects = app.startup();
    host.apply(effects, &mut startup_flow);
    host.window.set_visible(true);
    info!("launcher window shown");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                let effects = app.shutdown();
                host.apply(effects, control_flow);
                *control_flow = ControlFlow::Exit;
            }

            Event::WindowEvent {
                event: WindowEvent::Moved(pos),
                ..
            } => {
                let logical: LogicalPosition<i32> = pos.to_logical(host.window.scale_factor());
                let effects = app.dispatch(ControllerEvent::WindowMoved(Point::new(logical.x, logical.y)));
                host.apply(effects, control_flow);
            }

            Event::UserEvent(UserEvent::Ipc(surface, body)) => match IpcMessage::parse(&body) {
                Ok(IpcMessage::UrlChanged { url, replace }) if surface == Surface::Browser => {
                    let can_go_back = host.history.on_url_changed(&url, replace);
                    let effects = app.dispatch(ControllerEvent::Navigated { url, can_go_back });
                    host.apply(effects, control_flow);
                }
                Ok(IpcMessage::Ready) if surface == Surface::Bar => {
                    // the bar may have missed updates sent before it finished loading
                    let affordances = app.controller.affordances();
                    host.apply(vec![UiEffect::SetAffordances(affordances)], control_flow);
                }
                Ok(msg) => {
                    if let Some(event) = msg.into_event(surface, host.window_position()) {
                        let effects = app.dispatch(event);
                        host.apply(effects, control_flow);
                    }
                }
                Err(e) => debug!(error = %e, ?surface, "ignored IPC message"),
            },

            Event::UserEvent(UserEvent::PageLoaded(url)) => {
                let can_go_back = host.history.on_page_loaded(&url);
                let effects = app.dispatch(ControllerEvent::Navigated { url, can_go_back });
                host.apply(effects, control_flow);
            }

            Event::UserEvent(UserEvent::OpenUrl(url)) => {
                if app.controller.phase() == Phase::Expanded {
                    host.apply(vec![UiEffect::LoadUrl(url)], control_flow);
                } else {
                    debug!(%url, "popup ignored while collapsed");
                }
            }

            _ => {}
        }
    });
}
