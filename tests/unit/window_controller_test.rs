//! Unit tests for the WindowController state machine.
//!
//! Every test drives the controller with explicit events against an
//! in-memory store; no window or web view is involved.

use pqdi_launcher::managers::drag_tracker::{PointerButton, Surface};
use pqdi_launcher::managers::nav_history::BLANK_URL;
use pqdi_launcher::managers::window_controller::{
    Affordances, ControllerEvent, Layout, Phase, UiEffect, WindowController,
};
use pqdi_launcher::services::position_store::MemoryPositionStore;
use pqdi_launcher::services::site_registry::SiteRegistry;
use pqdi_launcher::types::errors::LauncherError;
use pqdi_launcher::types::geometry::{Point, Size};
use pqdi_launcher::types::window_state::WindowState;

const EXPANDED: Size = Size::new(1000, 600);
const COLLAPSED: Size = Size::new(280, 60);
const PQDI_URL: &str = "https://www.pqdi.cc/spells";

fn layout() -> Layout {
    Layout {
        expanded: EXPANDED,
        collapsed: COLLAPSED,
    }
}

fn started_with(store: MemoryPositionStore) -> (WindowController<MemoryPositionStore>, Vec<UiEffect>) {
    let mut controller = WindowController::new(SiteRegistry::default(), layout(), store);
    let effects = controller.start();
    (controller, effects)
}

fn started() -> WindowController<MemoryPositionStore> {
    started_with(MemoryPositionStore::new()).0
}

fn navigated(url: &str, can_go_back: bool) -> ControllerEvent {
    ControllerEvent::Navigated {
        url: url.to_string(),
        can_go_back,
    }
}

fn last_size(effects: &[UiEffect]) -> Option<Size> {
    effects.iter().rev().find_map(|e| match e {
        UiEffect::Resize(size) => Some(*size),
        _ => None,
    })
}

fn last_affordances(effects: &[UiEffect]) -> Option<Affordances> {
    effects.iter().rev().find_map(|e| match e {
        UiEffect::SetAffordances(a) => Some(*a),
        _ => None,
    })
}

// ─── LoadSite ───

#[test]
fn test_load_site_from_collapsed_expands() {
    let mut c = started();
    let effects = c.handle(ControllerEvent::LoadSite("pqdi".into())).unwrap();

    assert_eq!(c.phase(), Phase::Expanded);
    assert_eq!(last_size(&effects), Some(EXPANDED));
    assert!(effects.contains(&UiEffect::ShowBrowser(true)));
    assert!(effects.contains(&UiEffect::LoadUrl(PQDI_URL.to_string())));
    assert_eq!(
        last_affordances(&effects),
        Some(Affordances { back: false, hide: true, close: false, browser: true })
    );

    assert!(c.state().expanded);
    assert_eq!(c.state().current_url.as_deref(), Some(PQDI_URL));
    assert_eq!(c.store().saved(), Some(c.state()));
}

#[test]
fn test_load_site_while_expanded_navigates_without_resize() {
    let mut c = started();
    c.handle(ControllerEvent::LoadSite("pqdi".into())).unwrap();

    let effects = c.handle(ControllerEvent::LoadSite("wiki".into())).unwrap();

    assert_eq!(effects, vec![UiEffect::LoadUrl("https://wiki.takp.info/".into())]);
    assert_eq!(c.phase(), Phase::Expanded);
    assert_eq!(c.state().current_url.as_deref(), Some("https://wiki.takp.info/"));
    assert_eq!(c.store().saved().unwrap().current_url.as_deref(), Some("https://wiki.takp.info/"));
}

#[test]
fn test_unknown_site_is_rejected_without_state_change() {
    let mut c = started();
    let saves_before = c.store().save_count();

    let result = c.handle(ControllerEvent::LoadSite("bazaar".into()));

    assert!(matches!(result, Err(LauncherError::UnknownSite(id)) if id == "bazaar"));
    assert_eq!(c.phase(), Phase::Collapsed);
    assert_eq!(*c.state(), WindowState::default());
    assert_eq!(c.store().save_count(), saves_before);
}

// ─── Hide ───

#[test]
fn test_hide_returns_to_collapsed_dimensions() {
    let mut c = started();
    c.handle(ControllerEvent::LoadSite("trade".into())).unwrap();
    c.handle(navigated("https://www.eqtraders.com/recipes", true)).unwrap();
    assert!(c.affordances().back);

    let effects = c.handle(ControllerEvent::Hide).unwrap();

    assert_eq!(effects[0], UiEffect::LoadUrl(BLANK_URL.to_string()));
    assert!(effects.contains(&UiEffect::ShowBrowser(false)));
    assert_eq!(last_size(&effects), Some(COLLAPSED));
    assert_eq!(
        last_affordances(&effects),
        Some(Affordances { back: false, hide: false, close: true, browser: false })
    );
    assert_eq!(c.phase(), Phase::Collapsed);
    assert!(!c.state().expanded);
    assert_eq!(c.state().current_url, None);
    assert_eq!(c.store().saved(), Some(c.state()));
}

#[test]
fn test_hide_while_collapsed_is_a_no_op() {
    let mut c = started();
    assert!(c.handle(ControllerEvent::Hide).unwrap().is_empty());
    assert_eq!(c.phase(), Phase::Collapsed);
}

/// Loads that finish after collapsing must not put a URL back into a collapsed record.
#[test]
fn test_late_navigation_after_hide_is_not_recorded() {
    let mut c = started();
    c.handle(ControllerEvent::LoadSite("pqdi".into())).unwrap();
    c.handle(ControllerEvent::Hide).unwrap();

    c.handle(navigated(PQDI_URL, false)).unwrap();
    c.handle(navigated(BLANK_URL, false)).unwrap();

    assert_eq!(c.state().current_url, None);
    assert!(!c.affordances().back);
}

// ─── Navigation / Back ───

#[test]
fn test_back_visibility_mirrors_can_go_back() {
    let mut c = started();
    c.handle(ControllerEvent::LoadSite("pqdi".into())).unwrap();

    let first = c.handle(navigated(PQDI_URL, false)).unwrap();
    assert_eq!(last_affordances(&first).map(|a| a.back), Some(false));

    let second = c.handle(navigated("https://www.pqdi.cc/spell/93", true)).unwrap();
    assert_eq!(last_affordances(&second).map(|a| a.back), Some(true));
    assert_eq!(c.state().current_url.as_deref(), Some("https://www.pqdi.cc/spell/93"));

    let back_home = c.handle(navigated(PQDI_URL, false)).unwrap();
    assert_eq!(last_affordances(&back_home).map(|a| a.back), Some(false));
}

#[test]
fn test_back_only_acts_when_visible() {
    let mut c = started();
    assert!(c.handle(ControllerEvent::Back).unwrap().is_empty());

    c.handle(ControllerEvent::LoadSite("pqdi".into())).unwrap();
    c.handle(navigated(PQDI_URL, false)).unwrap();
    assert!(c.handle(ControllerEvent::Back).unwrap().is_empty());

    c.handle(navigated("https://www.pqdi.cc/zones", true)).unwrap();
    assert_eq!(c.handle(ControllerEvent::Back).unwrap(), vec![UiEffect::GoBack]);
    assert_eq!(c.phase(), Phase::Expanded);
}

#[test]
fn test_navigation_persists_immediately() {
    let mut c = started();
    c.handle(ControllerEvent::LoadSite("price".into())).unwrap();
    let saves = c.store().save_count();

    c.handle(navigated("https://www.pqdi.cc/market?item=1", true)).unwrap();

    assert_eq!(c.store().save_count(), saves + 1);
    assert_eq!(
        c.store().saved().unwrap().current_url.as_deref(),
        Some("https://www.pqdi.cc/market?item=1")
    );
}

// ─── Drag ───

#[test]
fn test_drag_moves_window_and_persists_each_move() {
    let mut c = started();
    c.handle(ControllerEvent::PointerDown {
        surface: Surface::Bar,
        global: Point::new(500, 500),
        window: Point::new(200, 100),
        button: PointerButton::Primary,
    })
    .unwrap();
    assert!(c.is_dragging(Surface::Bar));
    assert!(!c.is_dragging(Surface::Browser));

    let first = c
        .handle(ControllerEvent::PointerMove {
            surface: Surface::Bar,
            global: Point::new(510, 490),
            primary_held: true,
        })
        .unwrap();
    assert_eq!(first, vec![UiEffect::MoveTo(Point::new(210, 90))]);
    let saves_after_first = c.store().save_count();

    let second = c
        .handle(ControllerEvent::PointerMove {
            surface: Surface::Bar,
            global: Point::new(450, 520),
            primary_held: true,
        })
        .unwrap();
    assert_eq!(second, vec![UiEffect::MoveTo(Point::new(150, 120))]);
    assert_eq!(c.store().save_count(), saves_after_first + 1);
    assert_eq!(c.store().saved().unwrap().position, Some(Point::new(150, 120)));

    c.handle(ControllerEvent::PointerUp {
        surface: Surface::Bar,
        button: PointerButton::Primary,
    })
    .unwrap();
    assert!(!c.is_dragging(Surface::Bar));
}

/// A drag started on one surface is not continued by moves reported by the other.
#[test]
fn test_drag_sessions_are_per_surface() {
    let mut c = started();
    c.handle(ControllerEvent::PointerDown {
        surface: Surface::Browser,
        global: Point::new(0, 0),
        window: Point::new(0, 0),
        button: PointerButton::Primary,
    })
    .unwrap();

    let from_bar = c
        .handle(ControllerEvent::PointerMove {
            surface: Surface::Bar,
            global: Point::new(40, 40),
            primary_held: true,
        })
        .unwrap();
    assert!(from_bar.is_empty());

    c.handle(ControllerEvent::PointerCancel { surface: Surface::Browser }).unwrap();
    let after_cancel = c
        .handle(ControllerEvent::PointerMove {
            surface: Surface::Browser,
            global: Point::new(40, 40),
            primary_held: true,
        })
        .unwrap();
    assert!(after_cancel.is_empty());
}

#[test]
fn test_pointer_up_with_any_button_ends_drag() {
    let mut c = started();
    c.handle(ControllerEvent::PointerDown {
        surface: Surface::Bar,
        global: Point::new(0, 0),
        window: Point::new(0, 0),
        button: PointerButton::Primary,
    })
    .unwrap();
    c.handle(ControllerEvent::PointerUp {
        surface: Surface::Bar,
        button: PointerButton::Secondary,
    })
    .unwrap();
    assert!(!c.is_dragging(Surface::Bar));
}

#[test]
fn test_window_moved_updates_position_once() {
    let mut c = started();
    c.handle(ControllerEvent::WindowMoved(Point::new(30, 40))).unwrap();
    let saves = c.store().save_count();
    c.handle(ControllerEvent::WindowMoved(Point::new(30, 40))).unwrap();
    assert_eq!(c.store().save_count(), saves);
    assert_eq!(c.state().position, Some(Point::new(30, 40)));
}

// ─── Startup / Close ───

#[test]
fn test_restart_resumes_expanded_session() {
    let position = Point::new(812, 64);
    let url = "https://www.pqdi.cc/npc/4242";
    let store = MemoryPositionStore::with_state(WindowState::expanded_at(Some(position), url));

    let (c, effects) = started_with(store);

    assert_eq!(effects.first(), Some(&UiEffect::MoveTo(position)));
    assert_eq!(last_size(&effects), Some(EXPANDED));
    assert!(effects.contains(&UiEffect::LoadUrl(url.to_string())));
    assert_eq!(c.phase(), Phase::Expanded);
    assert_eq!(c.state().position, Some(position));
    assert_eq!(c.state().current_url.as_deref(), Some(url));
}

#[test]
fn test_restart_expanded_without_url_uses_default_site() {
    let store = MemoryPositionStore::with_state(WindowState {
        position: None,
        expanded: true,
        current_url: None,
    });

    let (c, effects) = started_with(store);

    assert!(effects.contains(&UiEffect::LoadUrl(PQDI_URL.to_string())));
    assert!(!effects.iter().any(|e| matches!(e, UiEffect::MoveTo(_))));
    assert_eq!(c.phase(), Phase::Expanded);
}

#[test]
fn test_restart_collapsed_drops_stale_url() {
    let store = MemoryPositionStore::with_state(WindowState {
        position: Some(Point::new(5, 5)),
        expanded: false,
        current_url: Some("https://stale.example/".into()),
    });

    let (c, effects) = started_with(store);

    assert_eq!(c.phase(), Phase::Collapsed);
    assert!(!effects.iter().any(|e| matches!(e, UiEffect::LoadUrl(_))));
    assert_eq!(c.state().current_url, None);
}

#[test]
fn test_unavailable_store_falls_back_to_defaults_and_keeps_running() {
    let mut store = MemoryPositionStore::new();
    store.set_available(false);
    let (mut c, _) = started_with(store);

    assert_eq!(c.phase(), Phase::Collapsed);
    let effects = c.handle(ControllerEvent::LoadSite("wiki".into())).unwrap();
    assert!(effects.contains(&UiEffect::Resize(EXPANDED)));
    assert_eq!(c.store().save_count(), 0);
}

#[test]
fn test_close_persists_and_exits() {
    let mut c = started();
    c.handle(ControllerEvent::WindowMoved(Point::new(99, 98))).unwrap();

    let effects = c.handle(ControllerEvent::Close).unwrap();

    assert_eq!(effects, vec![UiEffect::Exit]);
    assert_eq!(c.phase(), Phase::Terminated);
    assert_eq!(c.store().saved().unwrap().position, Some(Point::new(99, 98)));
    assert!(matches!(
        c.handle(ControllerEvent::LoadSite("pqdi".into())),
        Err(LauncherError::Terminated)
    ));
}

/// Closing while expanded keeps the expanded record so the next start resumes it.
#[test]
fn test_close_while_expanded_keeps_session() {
    let mut c = started();
    c.handle(ControllerEvent::LoadSite("wiki".into())).unwrap();
    c.handle(ControllerEvent::Close).unwrap();

    let saved = c.store().saved().unwrap();
    assert!(saved.expanded);
    assert_eq!(saved.current_url.as_deref(), Some("https://wiki.takp.info/"));
}
