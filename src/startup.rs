use axum::{extract::FromRef, Router};
use axum_flash::Key;
use axum_sessions::{async_session::MemoryStore, SameSite, SessionLayer};
use secrecy::ExposeSecret;

use crate::authentication::UserStore;
use crate::configuration::Settings;
use crate::routes::web_routes;

pub const SESSION_COOKIE_NAME: &str = "sid";

/// Shared application state handed to request handlers and middleware.
/// The session store is exposed so handlers that rotate a session's
/// identifier can purge the record kept under the old one.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub users: UserStore,
    pub sessions: MemoryStore,
    pub flash_config: axum_flash::Config,
}

/// Builds the application router: the route table is assembled once from
/// the feature configuration, then materialized behind its session layer.
pub fn run(configuration: &Settings, users: UserStore) -> Router {
    let secret = configuration.application.session_secret.expose_secret();

    let sessions = MemoryStore::new();
    let state = AppState {
        users,
        sessions: sessions.clone(),
        flash_config: axum_flash::Config::new(Key::from(secret.as_bytes())),
    };

    // Cookies are plain HTTP here; TLS termination happens upstream.
    let session_layer = SessionLayer::new(sessions, secret.as_bytes())
        .with_cookie_name(SESSION_COOKIE_NAME)
        .with_secure(false)
        .with_same_site_policy(SameSite::Lax);

    web_routes(&configuration.features)
        .into_router(state)
        .layer(session_layer)
}
