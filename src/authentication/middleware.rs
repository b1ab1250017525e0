use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_sessions::SessionHandle;
use derive_more::Deref;
use uuid::Uuid;

use super::{Guard, UserStore};
use crate::session_state::TypedSession;

/// How long a password confirmation stays fresh. Mirrors the three hours
/// browsers are used to from the upstream framework default.
const PASSWORD_CONFIRMATION_WINDOW_SECONDS: i64 = 3 * 60 * 60;

#[derive(Copy, Clone, Debug, Deref)]
pub struct UserId(Uuid);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Middleware function that redirects requests to "/login" unless a
/// principal is logged in under the web guard. The principal is exposed to
/// downstream handlers as a `UserId` request extension.
pub async fn reject_anonymous_users<B>(mut request: Request<B>, next: Next<B>) -> Response {
    let session_handle = request.extensions().get::<SessionHandle>();
    if let Some(session_handle) = session_handle {
        let user_id = session_handle.read().await.get(Guard::Web.user_id_key());
        if let Some(user_id) = user_id {
            request.extensions_mut().insert(UserId(user_id));
            return next.run(request).await;
        }
    }
    Redirect::to("/login").into_response()
}

/// Sends principals without a verified e-mail address back to the home
/// page. Must run after `reject_anonymous_users`, which provides the
/// `UserId` extension.
pub async fn reject_unverified_users<B>(
    State(users): State<UserStore>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let user_id = request.extensions().get::<UserId>().copied();
    match user_id {
        Some(user_id) if users.is_verified(*user_id).await => next.run(request).await,
        _ => Redirect::to("/").into_response(),
    }
}

/// Gate for sensitive pages: the principal must have confirmed their
/// password recently. Stale confirmations are sent back through "/login",
/// which re-confirms on success.
pub async fn require_recent_password_confirmation<B>(
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let session_handle = request.extensions().get::<SessionHandle>();
    if let Some(session_handle) = session_handle {
        let confirmed_at: Option<i64> = session_handle
            .read()
            .await
            .get(TypedSession::PASSWORD_CONFIRMED_AT_KEY);
        if let Some(confirmed_at) = confirmed_at {
            let age = chrono::Utc::now().timestamp() - confirmed_at;
            if age <= PASSWORD_CONFIRMATION_WINDOW_SECONDS {
                return next.run(request).await;
            }
        }
    }
    Redirect::to("/login").into_response()
}
