use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_flash::IncomingFlashes;
use std::fmt::Write;

use crate::{error_handling::error_chain_fmt, session_state::TypedSession};

#[derive(thiserror::Error)]
pub enum LoginFormError {
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for LoginFormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl IntoResponse for LoginFormError {
    fn into_response(self) -> Response {
        tracing::error!("{:?}", self);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

pub async fn login_form(
    flashes: IncomingFlashes,
    mut session: TypedSession,
) -> Result<impl IntoResponse, LoginFormError> {
    let mut error_html = String::new();
    for (_, text) in flashes
        .iter()
        .filter(|(level, _)| level == &axum_flash::Level::Error)
    {
        writeln!(error_html, "<p><i>{text}</i></p>").unwrap();
    }
    // The form is useless without a token the POST handler will accept.
    let csrf_token = session
        .csrf_token()
        .map_err(|e| LoginFormError::UnexpectedError(e.into()))?;

    Ok((
        StatusCode::OK,
        flashes,
        Html(format!(
            r#"<!DOCTYPE html>
        <html lang="en">

        <head>
            <meta http-equiv="content-type" content="text/html; charset=utf-8">
            <title>Login</title>
        </head>

        <body>
            {error_html}
            <form action="/login" method="post">
                <input type="hidden" name="_token" value="{csrf_token}">
                <label>Username
                    <input type="text" placeholder="Enter Username" name="username">
                </label>

                <label>Password
                    <input type="password" placeholder="Enter Password" name="password">
                </label>

                <button type="submit">Login</button>
            </form>
        </body>

        </html>"#,
        )),
    ))
}
