use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// The persisted launcher window state.
///
/// `expanded == false` always comes with `current_url == None`: collapsing the
/// window clears the URL, so a restored collapsed window never carries one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    /// Last outer position of the window. `None` until the window has been
    /// placed once; the toolkit default placement is used in that case.
    pub position: Option<Point>,
    pub expanded: bool,
    pub current_url: Option<String>,
}

impl WindowState {
    pub fn collapsed_at(position: Option<Point>) -> Self {
        Self {
            position,
            expanded: false,
            current_url: None,
        }
    }

    pub fn expanded_at(position: Option<Point>, url: impl Into<String>) -> Self {
        Self {
            position,
            expanded: true,
            current_url: Some(url.into()),
        }
    }
}
