//! Header parsing for locale negotiation.
//!
//! # Responsibilities
//! - Parse `Accept-Language` into language ranges ordered by preference
//! - Extract a single cookie value from a `Cookie` header
//!
//! # Design Decisions
//! - Malformed entries are skipped, never rejected
//! - Equal q-values keep header order (stable sort)

use std::cmp::Ordering;

/// One entry of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange<'a> {
    pub tag: &'a str,
    pub quality: f32,
}

/// Parse an `Accept-Language` header, most preferred first.
///
/// The wildcard range and entries with `q=0` are dropped.
pub fn parse_accept_language(header: &str) -> Vec<LanguageRange<'_>> {
    let mut ranges: Vec<LanguageRange<'_>> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let mut quality = 1.0;
            for param in parts {
                let param = param.trim();
                if let Some(q) = param.strip_prefix("q=").or_else(|| param.strip_prefix("Q=")) {
                    quality = q.trim().parse::<f32>().ok()?;
                }
            }
            if quality <= 0.0 || quality.is_nan() {
                return None;
            }
            Some(LanguageRange {
                tag,
                quality: quality.min(1.0),
            })
        })
        .collect();

    ranges.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    ranges
}

/// Value of the cookie called `name` in a `Cookie` header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() == name {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_language_ordering() {
        let ranges = parse_accept_language("fr-CH, fr;q=0.9, en;q=0.8, de;q=0.7, *;q=0.5");
        let tags: Vec<_> = ranges.iter().map(|r| r.tag).collect();
        assert_eq!(tags, vec!["fr-CH", "fr", "en", "de"]);
    }

    #[test]
    fn test_accept_language_reorders_by_quality() {
        let ranges = parse_accept_language("en;q=0.2, ja, es;q=0.9");
        let tags: Vec<_> = ranges.iter().map(|r| r.tag).collect();
        assert_eq!(tags, vec!["ja", "es", "en"]);
    }

    #[test]
    fn test_accept_language_skips_garbage_and_zero() {
        let ranges = parse_accept_language("de;q=abc, ,ru;q=0, it");
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].tag, "it");
    }

    #[test]
    fn test_cookie_value() {
        let header = "theme=dark; language=fr-FR;session=abc";
        assert_eq!(cookie_value(header, "language"), Some("fr-FR"));
        assert_eq!(cookie_value(header, "session"), Some("abc"));
        assert_eq!(cookie_value(header, "lang"), None);
    }
}
