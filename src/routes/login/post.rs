use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect},
};
use axum_flash::Flash;
use axum_sessions::async_session::{MemoryStore, SessionStore};
use secrecy::Secret;
use uuid::Uuid;

use crate::{
    authentication::{validate_credentials, AuthError, Credentials, Guard, UserStore},
    error_handling::error_chain_fmt,
    session_state::TypedSession,
};

#[derive(serde::Deserialize)]
pub struct FormData {
    username: String,
    password: Secret<String>,
}

#[derive(thiserror::Error)]
pub enum LoginError {
    #[error("Authentication failed")]
    AuthError(#[source] anyhow::Error),
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> axum::response::Response {
        match self {
            LoginError::AuthError(_) => tracing::warn!("{:?}", &self),
            LoginError::UnexpectedError(_) => tracing::error!("{:?}", &self),
        };

        Redirect::to("/login").into_response()
    }
}

pub struct FlashError {
    flash: Flash,
    e: LoginError,
}

impl IntoResponse for FlashError {
    fn into_response(self) -> axum::response::Response {
        (self.flash.error(self.e.to_string()), self.e).into_response()
    }
}

#[tracing::instrument(
    skip(users, sessions, flash, session, form),
    fields(username=tracing::field::Empty, user_id=tracing::field::Empty)
)]
pub async fn login(
    State(users): State<UserStore>,
    State(sessions): State<MemoryStore>,
    flash: Flash,
    mut session: TypedSession,
    Form(form): Form<FormData>,
) -> Result<impl IntoResponse, FlashError> {
    let credentials = Credentials {
        username: form.username,
        password: form.password,
    };

    tracing::Span::current().record("username", &tracing::field::display(&credentials.username));
    match validate_credentials(credentials, &users).await {
        Ok(user_id) => {
            tracing::Span::current().record("user_id", &tracing::field::display(&user_id));
            establish_session(&sessions, &mut session, user_id)
                .await
                .map_err(|e| FlashError {
                    flash,
                    e: LoginError::UnexpectedError(e),
                })?;
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(e) => Err(FlashError {
            flash,
            e: match e {
                AuthError::InvalidCredentials(_) => LoginError::AuthError(e.into()),
                AuthError::UnexpectedError(_) => LoginError::UnexpectedError(e.into()),
            },
        }),
    }
}

/// Binds the freshly authenticated principal to a renewed session: new
/// identifier, confirmation timestamp, new anti-forgery token. The record
/// stored under the pre-authentication identifier is purged so that
/// identifier can never resolve to the authenticated session.
async fn establish_session(
    sessions: &MemoryStore,
    session: &mut TypedSession,
    user_id: Uuid,
) -> Result<(), anyhow::Error> {
    let stale = session.renew();
    sessions.destroy_session(stale).await?;
    session.insert_user_id(Guard::Web, user_id)?;
    session.record_password_confirmation()?;
    session.regenerate_csrf_token()?;
    Ok(())
}
