/// All localized user-facing strings for a language.
///
/// Strings are stored raw. `tagline` carries trusted static markup and is
/// inserted into the page unescaped; everything else is plain text.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Header ====================
    /// Site tagline under the avatar (contains static markup)
    pub tagline: &'static str,

    /// `aria-label` for the language toggle
    pub toggle_aria_label: &'static str,

    /// Tooltip for the language toggle
    pub toggle_title: &'static str,

    // ==================== Stats ====================
    /// Caption under the follower counter
    pub stat_followers: &'static str,

    /// Caption under the repository counter
    pub stat_repos: &'static str,

    // ==================== Projects ====================
    /// Projects section title
    pub projects: &'static str,

    /// Label prefixing the last-push date on a card
    pub updated_label: &'static str,

    /// Hint appended to the fetch failure message
    pub error_hint: &'static str,
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    tagline: "Zero\u{2011}code apps and scripts by <b>PINGVI</b>. Pure vibe\u{2011}coding with AI.",
    toggle_aria_label: "Language: English",
    toggle_title: "English",

    stat_followers: "Followers",
    stat_repos: "Repos",

    projects: "Projects",
    updated_label: "Updated",
    error_hint: "Try later or use VPN.",
};

// ==================== Russian Strings ====================

pub const RUSSIAN_STRINGS: LanguageStrings = LanguageStrings {
    tagline: "Zero\u{2011}code приложения и скрипты от <b>PINGVI</b>. Чистый вайб\u{2011}кодинг с нейронками.",
    toggle_aria_label: "Язык: Русский",
    toggle_title: "Русский",

    stat_followers: "Подписчики",
    stat_repos: "Репозитории",

    projects: "Проекты",
    updated_label: "Обновлено",
    error_hint: "Попробуйте позже или используйте VPN.",
};
