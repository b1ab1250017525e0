use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Extension,
};

use crate::{
    authentication::{UserId, UserStore},
    error_handling::error_chain_fmt,
    session_state::TypedSession,
};

#[derive(Template)]
#[template(path = "dashboard.html")]
struct Dashboard<'a> {
    username: &'a str,
    csrf_token: &'a str,
}

#[derive(thiserror::Error)]
pub enum DashError {
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for DashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl IntoResponse for DashError {
    fn into_response(self) -> Response {
        tracing::error!("{:?}", self);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

pub async fn dashboard(
    State(users): State<UserStore>,
    mut session: TypedSession,
    user_id: Extension<UserId>,
) -> Result<Response, DashError> {
    let username = users
        .username(**user_id)
        .await
        .map_err(DashError::UnexpectedError)?;
    let csrf_token = session
        .csrf_token()
        .map_err(|e| DashError::UnexpectedError(e.into()))?;

    let page = Dashboard {
        username: &username,
        csrf_token: &csrf_token,
    }
    .render()
    .unwrap();
    Ok(Html(page).into_response())
}
