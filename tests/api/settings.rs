use account_portal::configuration::FeatureSettings;

use crate::helpers::{assert_is_redirect_to, spawn_app, spawn_app_with_features};

#[tokio::test]
async fn bare_settings_redirects_to_the_profile_page() {
    let app = spawn_app().await;
    app.post_login().await;

    let response = app.get("/settings").await;

    assert_eq!(response.status().as_u16(), 307);
    assert_eq!(
        response.headers().get("Location").unwrap(),
        "/settings/profile"
    );
}

#[tokio::test]
async fn settings_pages_require_authentication() {
    let app = spawn_app().await;

    for path in [
        "/settings",
        "/settings/profile",
        "/settings/password",
        "/settings/appearance",
        "/settings/two-factor",
    ] {
        let response = app.get(path).await;
        assert_is_redirect_to(&response, "/login");
    }
}

#[tokio::test]
async fn the_profile_page_shows_the_current_username() {
    let app = spawn_app().await;
    app.post_login().await;

    let response = app.get("/settings/profile").await;
    assert_eq!(response.status().as_u16(), 200);

    let body = response.text().await.unwrap();
    assert!(body.contains(&app.test_user.username));
}

#[tokio::test]
async fn the_two_factor_page_is_reachable_after_a_fresh_login() {
    // Login records a password confirmation, so the gate added by the
    // feature flag lets a freshly authenticated principal through.
    let app = spawn_app_with_features(FeatureSettings {
        two_factor_authentication: true,
        two_factor_confirm_password: true,
    })
    .await;
    app.post_login().await;

    let response = app.get("/settings/two-factor").await;

    assert_eq!(response.status().as_u16(), 200);
}
