//! Unit tests for the SiteRegistry: resolution and table validation.

use pqdi_launcher::services::site_registry::SiteRegistry;
use pqdi_launcher::types::errors::LauncherError;
use pqdi_launcher::types::site::Site;
use rstest::rstest;
use url::Url;

#[rstest]
#[case("pqdi")]
#[case("wiki")]
#[case("trade")]
#[case("price")]
fn test_every_default_id_resolves_to_a_well_formed_url(#[case] id: &str) {
    let registry = SiteRegistry::default();
    let url = registry.resolve(id).unwrap();
    assert!(!url.is_empty());
    let parsed = Url::parse(url).unwrap();
    assert_eq!(parsed.scheme(), "https");
    assert!(parsed.host_str().is_some());
}

#[rstest]
#[case("")]
#[case("PQDI")]
#[case("bazaar")]
#[case("pqdi ")]
fn test_ids_outside_registry_are_unknown(#[case] id: &str) {
    let registry = SiteRegistry::default();
    match registry.resolve(id) {
        Err(LauncherError::UnknownSite(name)) => assert_eq!(name, id),
        other => panic!("expected UnknownSite, got {:?}", other),
    }
}

#[test]
fn test_sites_keep_configured_order() {
    let registry = SiteRegistry::default();
    let ids: Vec<&str> = registry.sites().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["pqdi", "wiki", "trade", "price"]);
    assert_eq!(registry.default_site().id, "pqdi");
    assert!(registry.contains("wiki"));
}

#[test]
fn test_duplicate_ids_rejected() {
    let sites = vec![
        Site::new("wiki", "Wiki", "https://a.example/"),
        Site::new("wiki", "Wiki 2", "https://b.example/"),
    ];
    assert!(matches!(
        SiteRegistry::from_sites(sites, "wiki"),
        Err(LauncherError::InvalidSite(_))
    ));
}

#[rstest]
#[case("")]
#[case("www.pqdi.cc")]
#[case("file:///etc/passwd")]
#[case("javascript:alert(1)")]
fn test_malformed_urls_rejected(#[case] url: &str) {
    let sites = vec![Site::new("pqdi", "PQDI", url)];
    assert!(matches!(
        SiteRegistry::from_sites(sites, "pqdi"),
        Err(LauncherError::InvalidSite(_))
    ));
}

#[test]
fn test_empty_table_and_missing_default_rejected() {
    assert!(SiteRegistry::from_sites(Vec::new(), "pqdi").is_err());

    let sites = vec![Site::new("pqdi", "PQDI", "https://www.pqdi.cc/")];
    assert!(matches!(
        SiteRegistry::from_sites(sites, "wiki"),
        Err(LauncherError::UnknownSite(_))
    ));
}

#[test]
fn test_blank_id_rejected() {
    let sites = vec![Site::new("  ", "Blank", "https://www.pqdi.cc/")];
    assert!(SiteRegistry::from_sites(sites, "  ").is_err());
}
