use askama::Template;
use axum::{
    response::{Html, IntoResponse, Response},
    Extension,
};

use crate::authentication::UserId;

#[derive(Template)]
#[template(path = "settings/password.html")]
struct PasswordPage;

pub async fn password_page(_user_id: Extension<UserId>) -> Response {
    Html(PasswordPage.render().unwrap()).into_response()
}
