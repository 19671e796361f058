//! PQDI Launcher: a floating always-on-top button bar with an embedded browser.
//!
//! Entry point: opens the launcher window.
//! When built without the `gui` feature, walks the window controller through
//! a short session in the console instead.

#[cfg(feature = "gui")]
fn main() {
    if let Err(e) = pqdi_launcher::ui::webview_app::run() {
        eprintln!("pqdi-launcher: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    use pqdi_launcher::app::App;
    use pqdi_launcher::logging::{init_logging, LogConfig};
    use pqdi_launcher::managers::drag_tracker::{PointerButton, Surface};
    use pqdi_launcher::managers::window_controller::{ControllerEvent, UiEffect};
    use pqdi_launcher::services::position_store::MemoryPositionStore;
    use pqdi_launcher::types::geometry::Point;
    use pqdi_launcher::types::settings::LauncherSettings;

    init_logging(LogConfig::debug());

    println!("PQDI Launcher v{} (headless)", env!("CARGO_PKG_VERSION"));
    println!();

    let mut app = App::with_store(LauncherSettings::default(), MemoryPositionStore::new());
    let show = |label: &str, effects: Vec<UiEffect>| {
        println!("  {}", label);
        for effect in effects {
            println!("    -> {:?}", effect);
        }
    };

    show("startup", app.startup());
    show("press PQDI", app.dispatch(ControllerEvent::LoadSite("pqdi".into())));
    show(
        "page loaded",
        app.dispatch(ControllerEvent::Navigated {
            url: "https://www.pqdi.cc/spells".into(),
            can_go_back: false,
        }),
    );
    show(
        "follow a link",
        app.dispatch(ControllerEvent::Navigated {
            url: "https://www.pqdi.cc/spell/2".into(),
            can_go_back: true,
        }),
    );
    show(
        "grab the bar",
        app.dispatch(ControllerEvent::PointerDown {
            surface: Surface::Bar,
            global: Point::new(400, 300),
            window: Point::new(100, 100),
            button: PointerButton::Primary,
        }),
    );
    show(
        "drag",
        app.dispatch(ControllerEvent::PointerMove {
            surface: Surface::Bar,
            global: Point::new(460, 340),
            primary_held: true,
        }),
    );
    show(
        "release",
        app.dispatch(ControllerEvent::PointerUp {
            surface: Surface::Bar,
            button: PointerButton::Primary,
        }),
    );
    show("hide", app.dispatch(ControllerEvent::Hide));
    show("close", app.shutdown());

    println!();
    println!("  saved state: {:?}", app.controller.store().saved());
}
