//! Per-request locale resolution.

use serde::Serialize;

use crate::locale::negotiate::parse_accept_language;
use crate::locale::set::LocaleSet;

/// Raw locale hints carried by a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleInputs<'a> {
    /// Explicit query-string override.
    pub requested: Option<&'a str>,
    /// Value of the locale cookie.
    pub cookie: Option<&'a str>,
    /// `Accept-Language` header.
    pub accept_language: Option<&'a str>,
}

/// Where the resolved locale came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleSource {
    Query,
    Cookie,
    Header,
    Default,
}

/// Outcome of locale resolution. `locale` is always a member of the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleResolution {
    pub locale: String,
    pub source: LocaleSource,
    /// The client's cookie disagrees with `locale` and should be rewritten.
    pub update_cookie: bool,
}

/// Resolve the active locale: query override, then cookie, then header,
/// then the default. Unsupported candidates are skipped.
pub fn resolve_locale(locales: &LocaleSet, inputs: LocaleInputs<'_>) -> LocaleResolution {
    let (locale, source) = pick(locales, inputs);
    let update_cookie = inputs.cookie.map(str::trim) != Some(locale);

    LocaleResolution {
        locale: locale.to_string(),
        source,
        update_cookie,
    }
}

fn pick<'s>(locales: &'s LocaleSet, inputs: LocaleInputs<'_>) -> (&'s str, LocaleSource) {
    if let Some(code) = inputs.requested.and_then(|q| locales.canonical(q)) {
        return (code, LocaleSource::Query);
    }
    if let Some(code) = inputs.cookie.and_then(|c| locales.canonical(c)) {
        return (code, LocaleSource::Cookie);
    }
    if let Some(header) = inputs.accept_language {
        let ranges = parse_accept_language(header);
        let matched = ranges
            .iter()
            .find_map(|r| locales.canonical(r.tag).or_else(|| locales.by_language(r.tag)));
        if let Some(code) = matched {
            return (code, LocaleSource::Header);
        }
    }
    (locales.default_locale(), LocaleSource::Default)
}
