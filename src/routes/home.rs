use askama::Template;
use axum::response::{Html, IntoResponse};

#[derive(Template)]
#[template(path = "welcome.html")]
struct Welcome;

pub async fn home() -> impl IntoResponse {
    Html(Welcome.render().unwrap())
}
