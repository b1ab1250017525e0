use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_sessions::async_session::{MemoryStore, SessionStore};

use crate::{
    authentication::Guard, error_handling::error_chain_fmt, session_state::TypedSession,
};

#[derive(thiserror::Error)]
pub enum LogoutError {
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for LogoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl IntoResponse for LogoutError {
    fn into_response(self) -> Response {
        tracing::error!("{:?}", self);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

/// Logs the current user out of the application.
///
/// The principal is cleared under the web guard, the session is invalidated
/// wholesale (fresh identifier, empty state, old record purged from the
/// store) and a new anti-forgery token is bound to the replacement session,
/// so neither the old identifier nor the old token can be replayed. Safe to
/// call on an already-anonymous session.
#[tracing::instrument(skip(sessions, session))]
pub async fn log_out(
    State(sessions): State<MemoryStore>,
    mut session: TypedSession,
) -> Result<Response, LogoutError> {
    session.forget_user(Guard::Web);
    let stale = session.invalidate();
    sessions.destroy_session(stale).await?;
    session
        .regenerate_csrf_token()
        .map_err(|e| LogoutError::UnexpectedError(e.into()))?;

    Ok(Redirect::to("/").into_response())
}
