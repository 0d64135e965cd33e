//! Path matching logic.
//!
//! # Responsibilities
//! - Match literal segments, `:name` parameters and a trailing `*` wildcard
//! - Recognize stale version segments in docs links
//! - Recognize trailing-slash paths
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Segments are percent-decoded before comparison and capture
//! - Every matcher is a pure function: path → Matched(params) | Unmatched
//! - Regex only where the shape cannot be expressed as segments

use std::borrow::Cow;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

/// Values captured by a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    named: Vec<(String, String)>,
    rest: Option<String>,
}

impl Params {
    /// A `:name` parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.named
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whatever the `*` wildcard (or a rewriting matcher) captured.
    pub fn rest(&self) -> Option<&str> {
        self.rest.as_deref()
    }

    fn with_rest(rest: impl Into<String>) -> Self {
        Self {
            named: Vec::new(),
            rest: Some(rest.into()),
        }
    }
}

/// Result of testing one matcher against a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(Params),
    Unmatched,
}

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    fn match_path(&self, path: &str) -> MatchOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    Wildcard,
}

/// A route pattern such as `/docs/:category/*`.
///
/// `*` must be the final segment and captures one or more remaining
/// segments, joined by `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn new(pattern: &str) -> Self {
        let segments = split_segments(pattern)
            .map(|s| match s {
                "*" => Segment::Wildcard,
                s if s.starts_with(':') => Segment::Param(s[1..].to_string()),
                s => Segment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }
}

impl Matcher for PathPattern {
    fn match_path(&self, path: &str) -> MatchOutcome {
        let Some(parts) = decode_segments(path) else {
            return MatchOutcome::Unmatched;
        };
        let mut params = Params::default();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Wildcard => {
                    if i >= parts.len() {
                        return MatchOutcome::Unmatched;
                    }
                    params.rest = Some(parts[i..].join("/"));
                    return MatchOutcome::Matched(params);
                }
                Segment::Literal(lit) => {
                    if parts.get(i).map(|p| &**p) != Some(lit.as_str()) {
                        return MatchOutcome::Unmatched;
                    }
                }
                Segment::Param(name) => match parts.get(i) {
                    // An encoded `/` would smuggle a second segment into one parameter.
                    Some(value) if !value.contains('/') => {
                        params.named.push((name.clone(), value.to_string()))
                    }
                    _ => return MatchOutcome::Unmatched,
                },
            }
        }

        if parts.len() == self.segments.len() {
            MatchOutcome::Matched(params)
        } else {
            MatchOutcome::Unmatched
        }
    }
}

/// Split and percent-decode `path`. `None` if a segment is not UTF-8 once decoded.
fn decode_segments(path: &str) -> Option<Vec<Cow<'_, str>>> {
    split_segments(path)
        .map(|s| percent_decode_str(s).decode_utf8().ok())
        .collect()
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

static VERSION_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/docs/v\d+\.\d+\.\d+(?:/(.*))?$").expect("version segment regex")
});

/// Matches `/docs/v<major>.<minor>.<patch>[/...]` and captures the
/// version-less target path in `rest`.
#[derive(Debug, Clone, Default)]
pub struct VersionedDocsMatcher;

impl Matcher for VersionedDocsMatcher {
    fn match_path(&self, path: &str) -> MatchOutcome {
        let Some(captures) = VERSION_SEGMENT.captures(path) else {
            return MatchOutcome::Unmatched;
        };
        let tail = captures.get(1).map(|m| m.as_str()).unwrap_or("");
        let target = if tail.is_empty() {
            "/docs".to_string()
        } else {
            format!("/docs/{}", tail)
        };
        MatchOutcome::Matched(Params::with_rest(target))
    }
}

/// Matches any path other than `/` ending in `/`, capturing the trimmed path.
#[derive(Debug, Clone, Default)]
pub struct TrailingSlashMatcher;

impl Matcher for TrailingSlashMatcher {
    fn match_path(&self, path: &str) -> MatchOutcome {
        if path.len() <= 1 || !path.ends_with('/') {
            return MatchOutcome::Unmatched;
        }
        // Leading `//` or `/\` would read as a protocol-relative URL in Location.
        let trimmed = path.trim_end_matches('/').trim_start_matches(['/', '\\']);
        MatchOutcome::Matched(Params::with_rest(format!("/{}", trimmed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(outcome: MatchOutcome) -> Params {
        match outcome {
            MatchOutcome::Matched(p) => p,
            MatchOutcome::Unmatched => panic!("expected a match"),
        }
    }

    #[test]
    fn test_exact_pattern() {
        let pattern = PathPattern::new("/docs/all");
        assert!(matches!(pattern.match_path("/docs/all"), MatchOutcome::Matched(_)));
        assert_eq!(pattern.match_path("/docs"), MatchOutcome::Unmatched);
        assert_eq!(pattern.match_path("/docs/all/more"), MatchOutcome::Unmatched);
        assert_eq!(pattern.match_path("/Docs/all"), MatchOutcome::Unmatched);
    }

    #[test]
    fn test_root_pattern() {
        let pattern = PathPattern::new("/");
        assert!(matches!(pattern.match_path("/"), MatchOutcome::Matched(_)));
        assert_eq!(pattern.match_path("/apps"), MatchOutcome::Unmatched);
    }

    #[test]
    fn test_param_pattern() {
        let pattern = PathPattern::new("/apps/:slug");
        let params = matched(pattern.match_path("/apps/slack"));
        assert_eq!(params.get("slug"), Some("slack"));
        assert_eq!(params.rest(), None);
        assert_eq!(pattern.match_path("/apps"), MatchOutcome::Unmatched);
        assert_eq!(pattern.match_path("/apps/slack/extra"), MatchOutcome::Unmatched);
    }

    #[test]
    fn test_wildcard_pattern() {
        let pattern = PathPattern::new("/docs/:category/*");
        let params = matched(pattern.match_path("/docs/api/browser/window"));
        assert_eq!(params.get("category"), Some("api"));
        assert_eq!(params.rest(), Some("browser/window"));
        // The wildcard needs at least one segment.
        assert_eq!(pattern.match_path("/docs/api"), MatchOutcome::Unmatched);
    }

    #[test]
    fn test_versioned_docs() {
        let matcher = VersionedDocsMatcher;
        assert_eq!(matched(matcher.match_path("/docs/v1.2.3/guide")).rest(), Some("/docs/guide"));
        assert_eq!(
            matched(matcher.match_path("/docs/v10.0.12/api/app")).rest(),
            Some("/docs/api/app")
        );
        assert_eq!(matched(matcher.match_path("/docs/v0.37.8")).rest(), Some("/docs"));
        assert_eq!(matcher.match_path("/docs/v1/guide"), MatchOutcome::Unmatched);
        assert_eq!(matcher.match_path("/docs/v1.2/guide"), MatchOutcome::Unmatched);
        assert_eq!(matcher.match_path("/docs/v1.2.3beta/guide"), MatchOutcome::Unmatched);
        assert_eq!(matcher.match_path("/docs/guide"), MatchOutcome::Unmatched);
    }

    #[test]
    fn test_trailing_slash() {
        let matcher = TrailingSlashMatcher;
        assert_eq!(matched(matcher.match_path("/docs/")).rest(), Some("/docs"));
        assert_eq!(matched(matcher.match_path("/apps//")).rest(), Some("/apps"));
        assert_eq!(matched(matcher.match_path("//")).rest(), Some("/"));
        assert_eq!(matcher.match_path("/"), MatchOutcome::Unmatched);
        assert_eq!(matcher.match_path("/docs"), MatchOutcome::Unmatched);
    }

    #[test]
    fn test_trailing_slash_stays_on_site() {
        let matcher = TrailingSlashMatcher;
        assert_eq!(matched(matcher.match_path("//evil.example/")).rest(), Some("/evil.example"));
        assert_eq!(
            matched(matcher.match_path("//evil.example/path/")).rest(),
            Some("/evil.example/path")
        );
        assert_eq!(matched(matcher.match_path("/\\evil.example/")).rest(), Some("/evil.example"));
    }

    #[test]
    fn test_segments_are_percent_decoded() {
        let pattern = PathPattern::new("/apps/:slug");
        assert_eq!(matched(pattern.match_path("/apps/%61tom")).get("slug"), Some("atom"));
        assert_eq!(
            matched(pattern.match_path("/apps/hello%20world")).get("slug"),
            Some("hello world")
        );
        assert_eq!(matched(pattern.match_path("/%61pps/atom")).get("slug"), Some("atom"));
        // Encoded separators never widen a parameter.
        assert_eq!(pattern.match_path("/apps/a%2Fb"), MatchOutcome::Unmatched);
        // Invalid UTF-8 after decoding.
        assert_eq!(pattern.match_path("/apps/%FF"), MatchOutcome::Unmatched);

        let docs = PathPattern::new("/docs/:category/*");
        let params = matched(docs.match_path("/docs/tutorial/quick%2Dstart"));
        assert_eq!(params.rest(), Some("quick-start"));
    }
}
