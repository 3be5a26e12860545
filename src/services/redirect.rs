//! Redirect chain logic
//!
//! Landing → WebResults(page) → [Prelanding(key) →] external site. This
//! module holds the pure pieces: page-parameter parsing, sponsored/organic
//! partitioning with masked sponsored labels, and destination resolution
//! for a clicked result. The handlers in `api::visitor` drive it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::api::admin::types::TS_EXPORT_PATH;

use migration::entities::web_result;

/// UX grace period the frontend waits after an email capture before
/// navigating to the external URL
pub const REDIRECT_DELAY_MS: u64 = 1500;

/// Accepts both observed route variants: a bare page number and the
/// `wr=<page>` query form
pub fn parse_page_param(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    let digits = raw.strip_prefix("wr=").unwrap_or(raw);
    digits.parse().ok()
}

/// Hostname of a URL, without scheme, userinfo, port, path or query
pub fn host_of(url: &str) -> Option<String> {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = authority.rsplit_once('@').map(|(_, h)| h).unwrap_or(authority);
    let host = host.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// Synthetic label shown on sponsored listings instead of the raw URL,
/// derived from the item's 1-based ordinal within the sponsored group
pub fn masked_label(original_link: &str, ordinal: usize) -> String {
    let host = host_of(original_link).unwrap_or_else(|| "link".to_string());
    format!("{}.lid={}", host, ordinal + 1)
}

/// Path the frontend navigates to for an email-capture pass-through
pub fn build_prelanding_url(key: &str, original_link: &str, result_id: &str) -> String {
    format!(
        "/prelanding/{}?redirect={}&rid={}",
        key,
        urlencoding::encode(original_link),
        result_id
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Destination {
    /// Pass through the email-capture page first
    Prelanding { key: String, url: String },
    /// Open the external link directly, in a new browsing context
    External { url: String },
}

/// Where a clicked result sends the visitor
pub fn resolve_destination(result: &web_result::Model) -> Destination {
    match result.prelanding_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => Destination::Prelanding {
            key: key.to_string(),
            url: build_prelanding_url(key, &result.original_link, &result.id),
        },
        None => Destination::External {
            url: result.original_link.clone(),
        },
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ResultListing {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    /// Masked label for sponsored items, plain hostname for organic ones
    pub display_link: String,
    pub is_sponsored: bool,
    pub has_prelanding: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ResultsPage {
    pub page: i32,
    pub sponsored: Vec<ResultListing>,
    pub organic: Vec<ResultListing>,
}

/// Partition active results (already ordered by position) into the
/// sponsored group, rendered first, and the organic group
pub fn partition_results(page: i32, results: Vec<web_result::Model>) -> ResultsPage {
    let mut sponsored = Vec::new();
    let mut organic = Vec::new();

    for result in results {
        if result.is_sponsored {
            let listing = listing_from(&result, Some(sponsored.len()));
            sponsored.push(listing);
        } else {
            organic.push(listing_from(&result, None));
        }
    }

    ResultsPage {
        page,
        sponsored,
        organic,
    }
}

fn listing_from(result: &web_result::Model, sponsored_ordinal: Option<usize>) -> ResultListing {
    let display_link = match sponsored_ordinal {
        Some(ordinal) => masked_label(&result.original_link, ordinal),
        None => host_of(&result.original_link).unwrap_or_else(|| result.original_link.clone()),
    };

    ResultListing {
        id: result.id.clone(),
        title: result.title.clone(),
        description: result.description.clone(),
        logo_url: result.logo_url.clone(),
        display_link,
        is_sponsored: result.is_sponsored,
        has_prelanding: result
            .prelanding_key
            .as_deref()
            .is_some_and(|k| !k.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result(id: &str, link: &str, sponsored: bool, prelanding: Option<&str>) -> web_result::Model {
        web_result::Model {
            id: id.to_string(),
            title: format!("Result {}", id),
            description: None,
            original_link: link.to_string(),
            logo_url: None,
            web_result_page: 1,
            position: 0,
            is_sponsored: sponsored,
            prelanding_key: prelanding.map(String::from),
            backlink: None,
            country_codes: None,
            worldwide: true,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_page_param_variants() {
        assert_eq!(parse_page_param("3"), Some(3));
        assert_eq!(parse_page_param("wr=2"), Some(2));
        assert_eq!(parse_page_param(" wr=4 "), Some(4));
        assert_eq!(parse_page_param("abc"), None);
        assert_eq!(parse_page_param("wr="), None);
    }

    #[test]
    fn test_host_of() {
        assert_eq!(
            host_of("https://example.com/path?x=1"),
            Some("example.com".to_string())
        );
        assert_eq!(
            host_of("http://user@example.com:8080/p"),
            Some("example.com".to_string())
        );
        assert_eq!(host_of("example.com/p"), Some("example.com".to_string()));
        assert_eq!(host_of("https:///nohost"), None);
    }

    #[test]
    fn test_masked_label_is_one_based() {
        assert_eq!(
            masked_label("https://offers.example.net/go", 0),
            "offers.example.net.lid=1"
        );
        assert_eq!(
            masked_label("https://offers.example.net/go", 2),
            "offers.example.net.lid=3"
        );
    }

    #[test]
    fn test_build_prelanding_url_encoding() {
        let url = build_prelanding_url("promo1", "https://example.com/x", "abc");
        assert_eq!(
            url,
            "/prelanding/promo1?redirect=https%3A%2F%2Fexample.com%2Fx&rid=abc"
        );
    }

    #[test]
    fn test_resolve_destination_prelanding() {
        let r = result("r1", "https://example.com/x", true, Some("promo1"));
        match resolve_destination(&r) {
            Destination::Prelanding { key, url } => {
                assert_eq!(key, "promo1");
                assert!(url.starts_with("/prelanding/promo1?redirect="));
                assert!(url.ends_with("&rid=r1"));
            }
            other => panic!("expected prelanding destination, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_destination_external() {
        let r = result("r2", "https://example.com/y", false, None);
        match resolve_destination(&r) {
            Destination::External { url } => assert_eq!(url, "https://example.com/y"),
            other => panic!("expected external destination, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_prelanding_key_counts_as_none() {
        let r = result("r3", "https://example.com/z", false, Some(""));
        assert!(matches!(
            resolve_destination(&r),
            Destination::External { .. }
        ));
    }

    #[test]
    fn test_partition_sponsored_first_with_ordinals() {
        let results = vec![
            result("a", "https://one.test/x", false, None),
            result("b", "https://two.test/x", true, None),
            result("c", "https://three.test/x", true, None),
        ];

        let page = partition_results(1, results);
        assert_eq!(page.sponsored.len(), 2);
        assert_eq!(page.organic.len(), 1);
        assert_eq!(page.sponsored[0].display_link, "two.test.lid=1");
        assert_eq!(page.sponsored[1].display_link, "three.test.lid=2");
        assert_eq!(page.organic[0].display_link, "one.test");
    }
}
