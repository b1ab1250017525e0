use askama::Template;
use axum::{
    response::{Html, IntoResponse, Response},
    Extension,
};

use crate::authentication::UserId;

#[derive(Template)]
#[template(path = "settings/two_factor.html")]
struct TwoFactorPage;

pub async fn two_factor_page(_user_id: Extension<UserId>) -> Response {
    Html(TwoFactorPage.render().unwrap()).into_response()
}
