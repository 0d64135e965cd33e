//! Supported locale codes.

use serde::Serialize;
use thiserror::Error;

use crate::config::LocaleConfig;

/// Errors building a [`LocaleSet`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("no supported locales configured")]
    Empty,

    #[error("default locale '{0}' is not supported")]
    UnsupportedDefault(String),
}

/// Ordered set of supported locale codes with a designated default.
///
/// Lookups are case-insensitive and always hand back the configured
/// spelling, so downstream code can compare codes with `==`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleSet {
    supported: Vec<String>,
    default: String,
}

impl LocaleSet {
    pub fn new<I, S>(supported: I, default: &str) -> Result<Self, LocaleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut codes: Vec<String> = Vec::new();
        for code in supported {
            let code = code.into();
            if !codes.iter().any(|c| c.eq_ignore_ascii_case(&code)) {
                codes.push(code);
            }
        }
        if codes.is_empty() {
            return Err(LocaleError::Empty);
        }
        let default = codes
            .iter()
            .find(|c| c.eq_ignore_ascii_case(default))
            .cloned()
            .ok_or_else(|| LocaleError::UnsupportedDefault(default.to_string()))?;

        Ok(Self {
            supported: codes,
            default,
        })
    }

    pub fn from_config(config: &LocaleConfig) -> Result<Self, LocaleError> {
        Self::new(config.supported.iter().cloned(), &config.default)
    }

    pub fn default_locale(&self) -> &str {
        &self.default
    }

    pub fn codes(&self) -> &[String] {
        &self.supported
    }

    /// The configured spelling of `code`, if supported.
    pub fn canonical(&self, code: &str) -> Option<&str> {
        let code = code.trim();
        self.supported
            .iter()
            .find(|c| c.eq_ignore_ascii_case(code))
            .map(String::as_str)
    }

    /// First supported locale sharing `code`'s primary language subtag.
    pub fn by_language(&self, code: &str) -> Option<&str> {
        let primary = primary_subtag(code)?;
        self.supported
            .iter()
            .find(|c| primary_subtag(c).is_some_and(|p| p.eq_ignore_ascii_case(primary)))
            .map(String::as_str)
    }
}

fn primary_subtag(code: &str) -> Option<&str> {
    code.trim()
        .split(['-', '_'])
        .next()
        .filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> LocaleSet {
        LocaleSet::new(["en-US", "fr-FR", "zh-CN", "zh-TW"], "en-US").unwrap()
    }

    #[test]
    fn test_canonical_is_case_insensitive() {
        let locales = set();
        assert_eq!(locales.canonical("FR-fr"), Some("fr-FR"));
        assert_eq!(locales.canonical("de-DE"), None);
    }

    #[test]
    fn test_by_language_picks_first_in_order() {
        let locales = set();
        assert_eq!(locales.by_language("zh"), Some("zh-CN"));
        assert_eq!(locales.by_language("fr_CA"), Some("fr-FR"));
        assert_eq!(locales.by_language("pt-BR"), None);
    }

    #[test]
    fn test_default_must_be_supported() {
        assert_eq!(
            LocaleSet::new(["en-US"], "de-DE"),
            Err(LocaleError::UnsupportedDefault("de-DE".into()))
        );
        assert_eq!(LocaleSet::new(Vec::<String>::new(), "en-US"), Err(LocaleError::Empty));
        assert_eq!(LocaleSet::new(["en-US"], "EN-us").unwrap().default_locale(), "en-US");
    }
}
