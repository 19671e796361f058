//! Closed table of destinations reachable from the launcher bar.

use std::collections::HashSet;

use tracing::debug;
use url::Url;

use crate::types::errors::{LauncherError, Result};
use crate::types::site::{default_sites, Site};

/// Maps short site ids to destination URLs.
///
/// Built once at startup and never mutated. Entries keep their configured
/// order, which is also the order of the bar buttons.
#[derive(Debug, Clone)]
pub struct SiteRegistry {
    sites: Vec<Site>,
    default_id: String,
}

impl SiteRegistry {
    /// Builds a registry from configured entries.
    ///
    /// Rejects empty or duplicate ids, URLs that are not absolute `http(s)`
    /// URLs, an empty table, and a `default_id` that is not one of the entries.
    pub fn from_sites(sites: Vec<Site>, default_id: &str) -> Result<Self> {
        if sites.is_empty() {
            return Err(LauncherError::InvalidSite("registry has no sites".to_string()));
        }

        let mut seen = HashSet::new();
        for site in &sites {
            if site.id.trim().is_empty() {
                return Err(LauncherError::InvalidSite("site id cannot be empty".to_string()));
            }
            if !seen.insert(site.id.as_str()) {
                return Err(LauncherError::InvalidSite(format!("duplicate site id '{}'", site.id)));
            }
            validate_url(&site.url)
                .map_err(|reason| LauncherError::InvalidSite(format!("{}: {}", site.id, reason)))?;
        }

        if !seen.contains(default_id) {
            return Err(LauncherError::UnknownSite(default_id.to_string()));
        }

        debug!(count = sites.len(), default = default_id, "site registry built");
        Ok(Self {
            sites,
            default_id: default_id.to_string(),
        })
    }

    /// Looks up the destination URL for `id`.
    pub fn resolve(&self, id: &str) -> Result<&str> {
        self.get(id)
            .map(|site| site.url.as_str())
            .ok_or_else(|| LauncherError::UnknownSite(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|site| site.id == id)
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// The site loaded when an expanded window is restored without a saved URL.
    pub fn default_site(&self) -> &Site {
        // from_sites guarantees the default id is present
        self.get(&self.default_id).unwrap_or(&self.sites[0])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self {
            sites: default_sites(),
            default_id: "pqdi".to_string(),
        }
    }
}

fn validate_url(raw: &str) -> std::result::Result<(), String> {
    let parsed = Url::parse(raw).map_err(|e| format!("malformed URL '{}': {}", raw, e))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{}'", other)),
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(format!("URL '{}' has no host", raw));
    }
    Ok(())
}
