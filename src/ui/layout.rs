//! Placement of the two web views inside the launcher window.

use crate::types::geometry::{Point, Size};

/// A rectangle in window-relative logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pane {
    pub origin: Point,
    pub size: Size,
}

/// Bar across the top, browser below it. A collapsed window is all bar.
pub fn split(window: Size, bar_height: u32, browser_visible: bool) -> (Pane, Pane) {
    let bar_h = if browser_visible {
        bar_height.min(window.height)
    } else {
        window.height
    };
    let bar = Pane {
        origin: Point::new(0, 0),
        size: Size::new(window.width, bar_h),
    };
    let browser = Pane {
        origin: Point::new(0, i32::try_from(bar_h).unwrap_or(i32::MAX)),
        size: Size::new(window.width, window.height.saturating_sub(bar_h)),
    };
    (bar, browser)
}
