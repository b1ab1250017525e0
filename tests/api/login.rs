use crate::helpers::{assert_is_redirect_to, extract_csrf_token, session_cookie, spawn_app};

#[tokio::test]
async fn login_with_valid_credentials_redirects_to_the_dashboard() {
    let app = spawn_app().await;

    let response = app.post_login().await;

    assert_is_redirect_to(&response, "/dashboard");
}

#[tokio::test]
async fn login_discards_the_session_id_issued_before_authentication() {
    let app = spawn_app().await;
    // Visiting the form stores an anonymous session and sets its cookie.
    let response = app.get("/login").await;
    let (cookie_name, anonymous_session_id) =
        session_cookie(&response).expect("the login form did not set a session cookie");

    app.post_login().await;

    // An attacker who planted the anonymous identifier must not inherit the
    // authenticated session.
    let plain_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let response = plain_client
        .get(format!("{}/dashboard", &app.address))
        .header("Cookie", format!("{cookie_name}={anonymous_session_id}"))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_is_redirect_to(&response, "/login");
}

#[tokio::test]
async fn the_login_form_embeds_an_anti_forgery_token() {
    let app = spawn_app().await;

    let html = app.get_login_html().await;

    let token = extract_csrf_token(&html);
    assert!(!token.is_empty());
}

#[tokio::test]
async fn login_with_an_invalid_password_redirects_back_to_the_form() {
    let app = spawn_app().await;

    let response = app
        .post_login_with(&app.test_user.username, "definitely-not-the-password")
        .await;

    assert_is_redirect_to(&response, "/login");
}

#[tokio::test]
async fn login_with_an_unknown_username_redirects_back_to_the_form() {
    let app = spawn_app().await;

    let response = app.post_login_with("no-such-user", "whatever-password").await;

    assert_is_redirect_to(&response, "/login");
}
