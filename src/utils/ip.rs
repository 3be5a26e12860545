//! Client IP extraction
//!
//! Visitor traffic is expected to arrive through a reverse proxy, so
//! X-Forwarded-For (first entry) and X-Real-IP are preferred over the
//! peer address.

use actix_web::HttpRequest;

/// Extract the real client IP from a request
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    extract_forwarded_ip_from_headers(req.headers())
        .or_else(|| req.connection_info().peer_addr().map(String::from))
}

/// Extract the forwarded IP (X-Forwarded-For or X-Real-IP) from headers
pub fn extract_forwarded_ip_from_headers(
    headers: &actix_web::http::header::HeaderMap,
) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(String::from)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};

    fn headers_with(name: &'static str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_forwarded_for_takes_first_entry() {
        let headers = headers_with("x-forwarded-for", "203.0.113.7, 10.0.0.1");
        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("203.0.113.7".to_string())
        );
    }

    #[test]
    fn test_real_ip_fallback() {
        let headers = headers_with("x-real-ip", "198.51.100.4");
        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("198.51.100.4".to_string())
        );
    }

    #[test]
    fn test_no_headers_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(extract_forwarded_ip_from_headers(&headers), None);
    }

    #[test]
    fn test_empty_forwarded_for_falls_through() {
        let mut headers = headers_with("x-forwarded-for", "");
        headers.insert(
            HeaderName::from_static("x-real-ip"),
            HeaderValue::from_static("198.51.100.4"),
        );
        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("198.51.100.4".to_string())
        );
    }
}
