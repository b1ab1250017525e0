use askama::Template;
use axum::{
    response::{Html, IntoResponse, Response},
    Extension,
};

use crate::authentication::UserId;

#[derive(Template)]
#[template(path = "settings/appearance.html")]
struct AppearancePage;

pub async fn appearance_page(_user_id: Extension<UserId>) -> Response {
    Html(AppearancePage.render().unwrap()).into_response()
}
