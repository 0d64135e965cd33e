//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (default locale is a supported locale)
//! - Validate value ranges (timeouts > 0, cookie TTL > 0)
//! - Detect duplicate locales and navigation sections
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::fmt;

use crate::config::schema::SiteConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NoLocales,
    DuplicateLocale(String),
    DefaultLocaleUnsupported(String),
    EmptyCookieName,
    ZeroCookieTtl,
    EmptyQueryParam,
    ZeroRequestTimeout,
    DuplicateNavSection(String),
    EmptySiteTitle,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoLocales => write!(f, "locales.supported must not be empty"),
            ValidationError::DuplicateLocale(l) => write!(f, "locale '{}' listed twice", l),
            ValidationError::DefaultLocaleUnsupported(l) => {
                write!(f, "default locale '{}' is not in locales.supported", l)
            }
            ValidationError::EmptyCookieName => write!(f, "locales.cookie_name must not be empty"),
            ValidationError::ZeroCookieTtl => write!(f, "locales.cookie_ttl_secs must be > 0"),
            ValidationError::EmptyQueryParam => write!(f, "locales.query_param must not be empty"),
            ValidationError::ZeroRequestTimeout => write!(f, "timeouts.request_secs must be > 0"),
            ValidationError::DuplicateNavSection(s) => {
                write!(f, "navigation section '{}' listed twice", s)
            }
            ValidationError::EmptySiteTitle => write!(f, "site.title must not be empty"),
        }
    }
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let locales = &config.locales;

    if locales.supported.is_empty() {
        errors.push(ValidationError::NoLocales);
    }

    let mut seen = HashSet::new();
    for locale in &locales.supported {
        if !seen.insert(locale.to_ascii_lowercase()) {
            errors.push(ValidationError::DuplicateLocale(locale.clone()));
        }
    }

    let default_known = locales
        .supported
        .iter()
        .any(|l| l.eq_ignore_ascii_case(&locales.default));
    if !locales.supported.is_empty() && !default_known {
        errors.push(ValidationError::DefaultLocaleUnsupported(locales.default.clone()));
    }

    if locales.cookie_name.trim().is_empty() {
        errors.push(ValidationError::EmptyCookieName);
    }
    if locales.cookie_ttl_secs == 0 {
        errors.push(ValidationError::ZeroCookieTtl);
    }
    if locales.query_param.trim().is_empty() {
        errors.push(ValidationError::EmptyQueryParam);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.site.title.trim().is_empty() {
        errors.push(ValidationError::EmptySiteTitle);
    }

    let mut sections = HashSet::new();
    for entry in &config.site.nav {
        if !sections.insert(entry.section.as_str()) {
            errors.push(ValidationError::DuplicateNavSection(entry.section.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
