//! Tool input for the crawl bridge

use rmcp::schemars;
use serde::Deserialize;

/// Validated input for the `crawl_urls` tool.
///
/// Deserialization enforces the shape contract: the input must be an object
/// carrying a `urls` array of strings. Empty arrays, duplicate URLs, and
/// syntactically odd URLs are accepted; URL syntax is the crawling
/// service's call.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct CrawlRequest {
    /// URLs to submit to the crawling service
    #[schemars(description = "Array of URLs to crawl")]
    pub urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<CrawlRequest, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_accepts_url_array() {
        let request = parse(json!({
            "urls": ["https://example.com", "https://example.org/docs"]
        }))
        .unwrap();
        assert_eq!(request.urls.len(), 2);
        assert_eq!(request.urls[0], "https://example.com");
    }

    #[test]
    fn test_accepts_empty_array() {
        let request = parse(json!({ "urls": [] })).unwrap();
        assert!(request.urls.is_empty());
    }

    #[test]
    fn test_accepts_duplicates_and_odd_syntax() {
        let request = parse(json!({
            "urls": ["https://example.com", "https://example.com", "not a url"]
        }))
        .unwrap();
        assert_eq!(request.urls.len(), 3);
    }

    #[test]
    fn test_ignores_unknown_fields() {
        let request = parse(json!({ "urls": [], "depth": 3 })).unwrap();
        assert!(request.urls.is_empty());
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(parse(json!("https://example.com")).is_err());
        assert!(parse(json!(42)).is_err());
        assert!(parse(json!(["https://example.com"])).is_err());
        assert!(parse(json!(null)).is_err());
    }

    #[test]
    fn test_rejects_missing_urls() {
        assert!(parse(json!({})).is_err());
        assert!(parse(json!({ "url": "https://example.com" })).is_err());
    }

    #[test]
    fn test_rejects_non_array_urls() {
        assert!(parse(json!({ "urls": "https://example.com" })).is_err());
        assert!(parse(json!({ "urls": { "0": "https://example.com" } })).is_err());
    }

    #[test]
    fn test_rejects_non_string_element() {
        assert!(parse(json!({ "urls": ["https://example.com", 42] })).is_err());
        assert!(parse(json!({ "urls": [null] })).is_err());
    }
}
