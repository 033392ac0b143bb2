//! Page controller: HTTP surface, shared state and the fetch-render cycle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::github::{self, UserProfile};
use crate::i18n::{Language, LocaleProvider};
use crate::pipeline;
use crate::render::{render_page, GridState, PageState};

/// Cookie holding the persisted language preference.
pub const LANG_COOKIE: &str = "v2c_lang";

/// Shared application state.
///
/// The grid and profile are explicit values behind locks, rendered into
/// fresh markup on every request. The generation counter tags each
/// fetch-render cycle so a cycle finishing after a newer one started
/// discards its results instead of racing them into the shared state.
pub struct AppState {
    pub config: Config,
    repos: RwLock<GridState>,
    profile: RwLock<Option<UserProfile>>,
    generation: AtomicU64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            repos: RwLock::new(GridState::Loading),
            profile: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Start a new fetch-render cycle: bump the generation and clear the
    /// grid back to placeholders. Returns the cycle's generation tag.
    pub async fn begin_refresh(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.repos.write().await = GridState::Loading;
        generation
    }

    pub async fn grid(&self) -> GridState {
        self.repos.read().await.clone()
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        self.profile.read().await.clone()
    }
}

/// Run one full fetch-render cycle.
pub async fn refresh(state: &AppState) {
    let generation = state.begin_refresh().await;
    run_cycle(state, generation).await;
}

/// Fetch repositories and profile concurrently and store the results,
/// unless a newer cycle has started in the meantime.
///
/// The staleness check happens under the same write lock as each store, so
/// a generation bump can never slip in between the check and the write.
///
/// The two fetches fail independently: a dead profile endpoint leaves the
/// counters at their previous value while the grid still updates, and vice
/// versa.
pub async fn run_cycle(state: &AppState, generation: u64) {
    let (repos, profile) = tokio::join!(
        github::fetch_repositories(&state.config),
        github::fetch_user_profile(&state.config)
    );

    {
        let mut grid = state.repos.write().await;
        if state.generation.load(Ordering::SeqCst) != generation {
            info!("Discarding stale fetch results (generation {})", generation);
            return;
        }
        match repos {
            Ok(list) => {
                let prepared = pipeline::prepare(list, state.config.sort_mode);
                info!("Grid updated with {} repositories", prepared.len());
                *grid = GridState::Loaded(prepared);
            }
            Err(e) => {
                warn!("Repository fetch failed: {}", e);
                *grid = GridState::Failed(e.to_string());
            }
        }
    }

    match profile {
        Ok(p) => {
            let mut current = state.profile.write().await;
            if state.generation.load(Ordering::SeqCst) == generation {
                *current = Some(p);
            }
        }
        Err(e) => warn!("Profile fetch failed, keeping previous counters: {}", e),
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct IndexParams {
    lang: Option<String>,
}

/// `Accept-Language` header as the visitor's locale signal.
struct RequestLocale<'a>(&'a HeaderMap);

impl LocaleProvider for RequestLocale<'_> {
    fn locale(&self) -> Option<String> {
        let raw = self.0.get(header::ACCEPT_LANGUAGE)?.to_str().ok()?;
        let first = raw.split(',').next()?.trim();
        let locale = first.split(';').next()?.trim();
        if locale.is_empty() {
            None
        } else {
            Some(locale.to_string())
        }
    }
}

/// Extract the persisted language preference from the Cookie header.
fn cookie_language(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == LANG_COOKIE)
        .map(|(_, value)| value.to_string())
}

async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IndexParams>,
    headers: HeaderMap,
) -> Response {
    let toggled = params
        .lang
        .as_deref()
        .and_then(|code| Language::from_code(code).ok());

    let language = match toggled {
        Some(lang) => lang,
        None => {
            let saved = cookie_language(&headers);
            Language::resolve(saved.as_deref(), &RequestLocale(&headers))
        }
    };

    // An explicit ?lang= is the toggle click: persist the choice and restart
    // the whole fetch-render cycle, not just the labels. The grid is cleared
    // to placeholders before this response renders.
    if toggled.is_some() {
        let generation = state.begin_refresh().await;
        let cycle_state = Arc::clone(&state);
        tokio::spawn(async move { run_cycle(&cycle_state, generation).await });
    }

    let page = PageState {
        language,
        user: state.config.github_user.clone(),
        avatar_url: state.config.avatar_url.clone(),
        avatar_fallback_url: state.config.avatar_fallback_url.clone(),
        grid: state.grid().await,
        profile: state.profile().await,
        year: Utc::now().year(),
    };

    let mut response = Html(render_page(&page)).into_response();

    if toggled.is_some() {
        let cookie = format!(
            "{}={}; Path=/; Max-Age=31536000; SameSite=Lax",
            LANG_COOKIE,
            language.code()
        );
        if let Ok(value) = cookie.parse() {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }

    response
}

async fn healthz() -> &'static str {
    "ok"
}
