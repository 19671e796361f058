use serde::{Deserialize, Serialize};

/// A destination reachable from the launcher bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Short identifier used by the bar buttons, e.g. `pqdi`.
    pub id: String,
    /// Button caption.
    pub label: String,
    pub url: String,
}

impl Site {
    pub fn new(id: &str, label: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// The built-in reference sites, in bar order.
pub fn default_sites() -> Vec<Site> {
    vec![
        Site::new("pqdi", "PQDI", "https://www.pqdi.cc/spells"),
        Site::new("wiki", "Wiki", "https://wiki.takp.info/"),
        Site::new("trade", "Trade", "https://www.eqtraders.com/"),
        Site::new("price", "Price", "https://www.pqdi.cc/market"),
    ]
}
