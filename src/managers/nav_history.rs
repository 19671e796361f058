//! Back-navigation bookkeeping for the embedded browser.
//!
//! The web view reports finished page loads but has no "can go back" query,
//! so the launcher keeps its own view of the session history. Same-document
//! navigations (fragment links, `pushState`) never finish a load; the injected
//! page script reports those separately.

use url::Url;

/// The neutral page loaded when the browser is hidden.
pub const BLANK_URL: &str = "about:blank";

pub fn is_blank(url: &str) -> bool {
    url.is_empty() || url == BLANK_URL
}

/// Whether `url` is an http(s) address the browser view may open.
pub fn is_web_url(url: &str) -> bool {
    Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}

#[derive(Debug, Default)]
pub struct NavHistory {
    entries: Vec<String>,
    pending_back: bool,
}

impl NavHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished page load and returns whether back navigation is possible.
    ///
    /// Loading the blank page starts a fresh history. Reloading the current
    /// entry does not add a new one.
    pub fn on_page_loaded(&mut self, url: &str) -> bool {
        if is_blank(url) {
            self.reset();
            return false;
        }

        if self.pending_back {
            self.pending_back = false;
            if let Some(last) = self.entries.last_mut() {
                if last != url {
                    *last = url.to_string();
                }
                return self.can_go_back();
            }
        }

        if self.entries.last().map(String::as_str) != Some(url) {
            self.entries.push(url.to_string());
        }
        self.can_go_back()
    }

    /// Records a same-document URL change.
    ///
    /// `replace` is set for `history.replaceState`, which rewrites the current
    /// entry instead of adding one. Other changes are treated like a page load,
    /// including the URL change that follows a back navigation.
    pub fn on_url_changed(&mut self, url: &str, replace: bool) -> bool {
        if is_blank(url) {
            return self.can_go_back();
        }
        if !replace {
            return self.on_page_loaded(url);
        }
        match self.entries.last_mut() {
            Some(last) => *last = url.to_string(),
            None => self.entries.push(url.to_string()),
        }
        self.can_go_back()
    }

    /// Pops the current entry ahead of a back navigation. Returns `false` if there is nothing to go back to.
    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.entries.pop();
        self.pending_back = true;
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.pending_back = false;
    }
}
