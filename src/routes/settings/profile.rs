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
};

#[derive(Template)]
#[template(path = "settings/profile.html")]
struct ProfilePage<'a> {
    username: &'a str,
}

#[derive(thiserror::Error)]
pub enum ProfileError {
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        tracing::error!("{:?}", self);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

pub async fn profile_page(
    State(users): State<UserStore>,
    user_id: Extension<UserId>,
) -> Result<Response, ProfileError> {
    let username = users
        .username(**user_id)
        .await
        .map_err(ProfileError::UnexpectedError)?;

    let page = ProfilePage {
        username: &username,
    }
    .render()
    .unwrap();
    Ok(Html(page).into_response())
}
