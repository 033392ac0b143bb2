//! Language type: validated language value with preference resolution.

use anyhow::{bail, Result};

use crate::i18n::strings::{LanguageStrings, ENGLISH_STRINGS, RUSSIAN_STRINGS};
use crate::i18n::{LanguageConfig, LanguageRegistry};

/// Where the visitor's locale comes from.
///
/// The original site inspected `navigator.language`; on the server that
/// signal is the `Accept-Language` header. Abstracting it keeps language
/// resolution testable without a real browser or request.
pub trait LocaleProvider {
    /// The visitor's reported locale string (e.g. "ru-RU", "en-US"), if any.
    fn locale(&self) -> Option<String>;
}

impl LocaleProvider for Option<String> {
    fn locale(&self) -> Option<String> {
        self.clone()
    }
}

/// A validated language.
///
/// Only codes present in the registry can be constructed, so every
/// `Language` value has a string table and registry metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 language code ("en" or "ru")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const RUSSIAN: Language = Language { code: "ru" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is in the registry
    /// * `Err` otherwise
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The default language (English).
    pub fn default_language() -> Language {
        let config = LanguageRegistry::get().default_language();
        Language { code: config.code }
    }

    /// Resolve the active language for a visitor.
    ///
    /// A stored preference wins; otherwise the reported locale selects
    /// Russian when its prefix is "ru", and English is the fallback.
    /// Resolution is idempotent: the same inputs always give the same
    /// language.
    pub fn resolve(saved: Option<&str>, provider: &dyn LocaleProvider) -> Language {
        if let Some(code) = saved {
            if let Ok(lang) = Language::from_code(code) {
                return lang;
            }
        }

        match provider.locale() {
            Some(locale) if locale.to_lowercase().starts_with("ru") => Language::RUSSIAN,
            _ => Language::default_language(),
        }
    }

    /// The other language. Toggling twice returns to the original.
    pub fn toggle(&self) -> Language {
        if *self == Language::RUSSIAN {
            Language::ENGLISH
        } else {
            Language::RUSSIAN
        }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Registry metadata for this language.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a properly constructed `Language`.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// The localized string table for this language.
    pub fn strings(&self) -> &'static LanguageStrings {
        match self.code {
            "ru" => &RUSSIAN_STRINGS,
            _ => &ENGLISH_STRINGS,
        }
    }
}
