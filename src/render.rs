//! HTML rendering: pure functions from application state to markup.
//!
//! Every renderer takes its inputs explicitly and returns a `String`; no
//! function here touches the network or any shared state.

use chrono::{DateTime, Datelike, Utc};

use crate::github::{Repository, UserProfile};
use crate::i18n::{Language, LanguageRegistry};

/// Embedded stylesheet for the landing page.
const PAGE_STYLE: &str = include_str!("assets/style.css");

/// Number of placeholder cards shown while a fetch is in flight.
pub const PLACEHOLDER_CARDS: usize = 6;

/// The projects grid as seen by the renderer.
#[derive(Debug, Clone)]
pub enum GridState {
    /// A fetch-render cycle is in flight.
    Loading,
    /// Repositories ready for display, already pipeline-ordered.
    Loaded(Vec<Repository>),
    /// The repository fetch failed with this message.
    Failed(String),
}

/// Everything the page renderer needs for one response.
#[derive(Debug, Clone)]
pub struct PageState {
    pub language: Language,
    pub user: String,
    pub avatar_url: String,
    pub avatar_fallback_url: String,
    pub grid: GridState,
    pub profile: Option<UserProfile>,
    pub year: i32,
}

/// Replace special characters with their HTML entities.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Russian short month names, indexed by zero-based month.
/// chrono only formats English month names.
const RU_MONTHS_SHORT: [&str; 12] = [
    "янв", "февр", "мар", "апр", "мая", "июн", "июл", "авг", "сент", "окт", "нояб", "дек",
];

/// Format an RFC 3339 timestamp as a short localized date.
/// An unparseable value is returned as-is rather than failing the render.
pub fn format_date(iso: &str, language: Language) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(iso) else {
        return iso.to_string();
    };
    let date = parsed.with_timezone(&Utc);

    match language {
        Language::RUSSIAN => {
            let month = RU_MONTHS_SHORT[date.month0() as usize];
            format!("{:02} {} {}", date.day(), month, date.year())
        }
        _ => date.format("%b %d, %Y").to_string(),
    }
}

/// Render one repository card.
///
/// Chips are conditional: a language tag only when the API reports a
/// language, star/fork chips only for non-zero counts. The whole card links
/// out to the repository without leaking an opener or referrer.
pub fn render_card(repo: &Repository, language: Language) -> String {
    let strings = language.strings();
    let mut html = String::new();

    html.push_str("<article class=\"card\">");
    html.push_str(&format!(
        "<div class=\"title\"><h3>{}</h3></div>",
        escape_html(&repo.name)
    ));
    html.push_str(&format!(
        "<p>{}</p>",
        escape_html(repo.description.as_deref().unwrap_or(""))
    ));

    html.push_str("<div class=\"tags\">");
    if let Some(lang_name) = &repo.language {
        html.push_str(&format!(
            "<span class=\"tag\">{}</span>",
            escape_html(lang_name)
        ));
    }
    html.push_str("</div>");

    html.push_str("<div class=\"repo-chips\">");
    if repo.stargazers_count > 0 {
        html.push_str(&format!(
            "<span class=\"chip-star\"><span class=\"icon\">\u{2B50}</span><span>{}</span></span>",
            repo.stargazers_count
        ));
    }
    if repo.forks_count > 0 {
        html.push_str(&format!(
            "<span class=\"chip-fork\"><span class=\"icon\">\u{1F374}</span><span>{}</span></span>",
            repo.forks_count
        ));
    }
    html.push_str("</div>");

    if let Some(pushed_at) = &repo.pushed_at {
        html.push_str(&format!(
            "<div class=\"updated\">{} {}</div>",
            escape_html(strings.updated_label),
            escape_html(&format_date(pushed_at, language))
        ));
    }

    html.push_str(&format!(
        "<a class=\"repo-link\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"></a>",
        escape_html(&repo.html_url)
    ));
    html.push_str("</article>");

    html
}

/// One inert card used while repositories are loading.
fn render_placeholder_card() -> String {
    "<div class=\"card placeholder\"></div>".to_string()
}

/// The single card shown when the repository fetch failed.
pub fn render_error_card(message: &str, language: Language) -> String {
    let strings = language.strings();
    format!(
        "<div class=\"card error\"><p>{}. {}</p></div>",
        escape_html(message),
        escape_html(strings.error_hint)
    )
}

/// Render the projects grid contents for the current state.
pub fn render_grid(state: &GridState, language: Language) -> String {
    match state {
        GridState::Loading => (0..PLACEHOLDER_CARDS)
            .map(|_| render_placeholder_card())
            .collect(),
        GridState::Loaded(repos) => repos
            .iter()
            .map(|repo| render_card(repo, language))
            .collect(),
        GridState::Failed(message) => render_error_card(message, language),
    }
}

/// Shown in a counter when the profile fetch has not succeeded.
const STAT_PLACEHOLDER: &str = "\u{2014}";

/// Render the follower/repository counters.
pub fn render_stats(profile: Option<&UserProfile>, language: Language) -> String {
    let strings = language.strings();
    let (followers, repos) = match profile {
        Some(p) => (p.followers.to_string(), p.public_repos.to_string()),
        None => (STAT_PLACEHOLDER.to_string(), STAT_PLACEHOLDER.to_string()),
    };

    let mut html = String::new();
    html.push_str("<div class=\"stats\">");
    html.push_str(&format!(
        "<div class=\"stat\"><span id=\"followers-count\" class=\"count\">{}</span><span id=\"followers-caption\" class=\"caption\">{}</span></div>",
        followers,
        escape_html(strings.stat_followers)
    ));
    html.push_str(&format!(
        "<div class=\"stat\"><span id=\"repos-count\" class=\"count\">{}</span><span id=\"repos-caption\" class=\"caption\">{}</span></div>",
        repos,
        escape_html(strings.stat_repos)
    ));
    html.push_str("</div>");

    html
}

/// Render the full landing page document for one state snapshot.
pub fn render_page(state: &PageState) -> String {
    let language = state.language;
    let strings = language.strings();
    let other = language.toggle();

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>");
    html.push_str(&format!("<html lang=\"{}\">", language.code()));

    html.push_str("<head>");
    html.push_str("<meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str(&format!("<title>{}</title>", escape_html(&state.user)));
    for lang in LanguageRegistry::get().list() {
        html.push_str(&format!(
            "<link rel=\"alternate\" hreflang=\"{}\" href=\"/?lang={}\">",
            lang.code, lang.code
        ));
    }
    // Placeholders get swapped for real cards on the next render cycle.
    if matches!(state.grid, GridState::Loading) {
        html.push_str("<meta http-equiv=\"refresh\" content=\"2\">");
    }
    html.push_str("<style>");
    html.push_str(PAGE_STYLE);
    html.push_str("</style>");
    html.push_str("</head>");

    html.push_str("<body>");

    // Header: toggle, avatar, tagline
    html.push_str("<header>");
    html.push_str(&format!(
        "<a id=\"lang-toggle\" href=\"/?lang={}\" aria-label=\"{}\" title=\"{}\">{}</a>",
        other.code(),
        escape_html(strings.toggle_aria_label),
        escape_html(strings.toggle_title),
        language.config().flag
    ));
    html.push_str(&format!(
        "<img id=\"avatar\" src=\"{}\" alt=\"{}\" onerror=\"this.onerror=null;this.src='{}'\">",
        escape_html(&state.avatar_url),
        escape_html(&state.user),
        escape_html(&state.avatar_fallback_url)
    ));
    // Tagline markup is a trusted static string from the dictionary.
    html.push_str(&format!(
        "<p id=\"site-tagline\">{}</p>",
        strings.tagline
    ));
    html.push_str(&render_stats(state.profile.as_ref(), language));
    html.push_str("</header>");

    // Projects
    html.push_str("<main>");
    html.push_str(&format!(
        "<h2 id=\"projects-title\">{}</h2>",
        escape_html(strings.projects)
    ));
    html.push_str("<div id=\"projects-grid\" class=\"grid\">");
    html.push_str(&render_grid(&state.grid, language));
    html.push_str("</div>");
    html.push_str("</main>");

    html.push_str(&format!(
        "<footer><p id=\"footer-line-1\">\u{00A9} <span id=\"year\">{}</span> {}</p></footer>",
        state.year,
        escape_html(&state.user)
    ));

    html.push_str("</body></html>");

    html
}
