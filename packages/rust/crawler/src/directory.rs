//! Directory listing parser.
//!
//! The listing page links to one detail page per entity, all living under the
//! directory path (e.g. `/contact-us/state-contacts/ohio`). Everything else on
//! the page (navigation, footer, the listing's own self-link) is dropped.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use statedocs_shared::ListingEntry;

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

/// Minimum `/`-separated components in a detail path (`["", "a", "b", "c"]`).
const MIN_PATH_COMPONENTS: usize = 4;

/// Extract detail-page links from a listing page, in document order.
///
/// `directory_path` is the listing's own path without a trailing slash. Hrefs
/// are resolved against `base_url`, so root-relative and absolute links both
/// work.
pub fn parse_listing(html: &str, base_url: &Url, directory_path: &str) -> Vec<ListingEntry> {
    let doc = Html::parse_document(html);
    let self_path = directory_path.trim_end_matches('/');
    let marker = format!("{self_path}/");

    let mut entries = Vec::new();

    for el in doc.select(&LINK_SELECTOR) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };

        let resolved = match base_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!(href, error = %e, "unresolvable href, skipping");
                continue;
            }
        };

        if !is_detail_path(resolved.path(), &marker, self_path) {
            continue;
        }

        let display_name = el.text().collect::<String>().trim().to_string();
        debug!(%display_name, url = %resolved, "listing entry");

        entries.push(ListingEntry {
            display_name,
            detail_url: resolved.to_string(),
        });
    }

    entries
}

fn is_detail_path(path: &str, marker: &str, self_path: &str) -> bool {
    path.contains(marker)
        && path.split('/').count() >= MIN_PATH_COMPONENTS
        && path.trim_end_matches('/') != self_path
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECTORY: &str = "/contact-us/state-contacts";

    fn base() -> Url {
        Url::parse("https://www.ed.gov").unwrap()
    }

    #[test]
    fn keeps_only_detail_links() {
        let html = r#"<html><body>
            <nav>
              <a href="/">Home</a>
              <a href="/contact-us">Contact Us</a>
              <a href="/contact-us/state-contacts">State Contacts</a>
              <a href="/contact-us/state-contacts/">State Contacts</a>
            </nav>
            <ul>
              <li><a href="/contact-us/state-contacts/alabama"> Alabama </a></li>
              <li><a href="/contact-us/state-contacts/new-york">New York</a></li>
              <li><a href="https://www.ed.gov/contact-us/state-contacts/ohio">Ohio</a></li>
            </ul>
            <footer><a href="/about/state-contacts-faq">FAQ</a><a href="mailto:x@ed.gov">Mail</a></footer>
        </body></html>"#;

        let entries = parse_listing(html, &base(), DIRECTORY);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].display_name, "Alabama");
        assert_eq!(
            entries[0].detail_url,
            "https://www.ed.gov/contact-us/state-contacts/alabama"
        );
        assert_eq!(entries[1].display_name, "New York");
        assert_eq!(entries[2].display_name, "Ohio");
    }

    #[test]
    fn no_matches_is_empty() {
        let html = r#"<html><body><a href="/about">About</a></body></html>"#;
        assert!(parse_listing(html, &base(), DIRECTORY).is_empty());
    }

    #[test]
    fn listing_fixture_has_all_states() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/html/state-contacts.html");
        let html = std::fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("missing fixture: {}", path.display()));

        let entries = parse_listing(&html, &base(), DIRECTORY);
        let names: Vec<&str> = entries.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, ["Alabama", "Alaska", "District of Columbia", "Ohio"]);
    }

    #[test]
    fn detail_path_rules() {
        let marker = "/contact-us/state-contacts/";
        assert!(is_detail_path("/contact-us/state-contacts/ohio", marker, DIRECTORY));
        assert!(!is_detail_path("/contact-us/state-contacts", marker, DIRECTORY));
        assert!(!is_detail_path("/contact-us/state-contacts/", marker, DIRECTORY));
        assert!(!is_detail_path("/contact-us/ohio", marker, DIRECTORY));
    }
}
