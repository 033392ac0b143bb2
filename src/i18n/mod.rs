//! Internationalization (i18n) module.
//!
//! Everything language-related lives here: the registry of supported
//! languages, the validated `Language` type with preference/locale
//! resolution, and the static localized string tables.
//!
//! # Architecture
//!
//! - `registry`: single source of truth for supported languages and their metadata
//! - `language`: type-safe Language value with resolution and toggling
//! - `strings`: static localized strings for every user-facing label
//!
//! # Example
//!
//! ```rust,ignore
//! use vibe2code_landing::i18n::{Language, LocaleProvider};
//!
//! let lang = Language::resolve(None, &Some("ru-RU".to_string()));
//! assert_eq!(lang.code(), "ru");
//! let strings = lang.strings();
//! ```

mod language;
mod registry;
mod strings;

pub use language::{Language, LocaleProvider};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::LanguageStrings;
