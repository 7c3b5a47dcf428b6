//! Helpers for URL building and timestamp conversion.

use chrono::{DateTime, Local, Utc};
use url::Url;

/// Parse a base URL, forcing a trailing slash so relative endpoints join beneath it.
pub fn parse_base_url(base: &str) -> Result<Url, url::ParseError> {
    let base = base.trim();
    if base.ends_with('/') {
        Url::parse(base)
    } else {
        Url::parse(&format!("{}/", base))
    }
}

/// Relative path of a per-resource endpoint, e.g. `resource/abc/meterread`.
pub fn resource_path(resource_id: &str, endpoint: &str) -> String {
    format!(
        "{}/{}/{}",
        crate::constants::ENDPOINT_RESOURCE,
        urlencoding::encode(resource_id),
        endpoint
    )
}

/// Convert epoch seconds as reported by the API.
pub fn timestamp_from_epoch(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Format a timestamp for display. If `use_utc` is true, shows UTC; otherwise converts to local timezone.
pub fn format_timestamp_display(ts: DateTime<Utc>, use_utc: bool) -> String {
    if use_utc {
        ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    } else {
        ts.with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S %:z")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_adds_slash() {
        let url = parse_base_url("http://127.0.0.1:1234").unwrap();
        assert_eq!(url.join("auth").unwrap().as_str(), "http://127.0.0.1:1234/auth");

        let url = parse_base_url(crate::constants::BASE_URL).unwrap();
        assert_eq!(
            url.join("resource").unwrap().as_str(),
            "https://api.glowmarkt.com/api/v0-1/resource"
        );
    }

    #[test]
    fn test_resource_path_encodes_id() {
        assert_eq!(resource_path("abc-123", "tariff"), "resource/abc-123/tariff");
        assert_eq!(resource_path("a b/c", "meterread"), "resource/a%20b%2Fc/meterread");
    }

    #[test]
    fn test_timestamp_display() {
        let ts = timestamp_from_epoch(2000).unwrap();
        assert_eq!(format_timestamp_display(ts, true), "1970-01-01 00:33:20 UTC");
        assert!(timestamp_from_epoch(i64::MAX).is_none());
    }
}
