use std::net::TcpListener;

use fake::faker::internet::en::{Password, Username};
use fake::Fake;
use once_cell::sync::Lazy;
use secrecy::Secret;

use account_portal::authentication::UserStore;
use account_portal::configuration::{get_configuration, FeatureSettings};
use account_portal::startup::run;
use account_portal::telemetry::{get_subscriber, init_subscriber};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestUser {
    pub username: String,
    pub password: String,
}

impl TestUser {
    pub fn generate() -> Self {
        Self {
            username: Username().fake(),
            password: Password(12..20).fake(),
        }
    }
}

pub struct TestApp {
    pub address: String,
    pub users: UserStore,
    pub test_user: TestUser,
    pub api_client: reqwest::Client,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_features(FeatureSettings {
        two_factor_authentication: true,
        two_factor_confirm_password: false,
    })
    .await
}

pub async fn spawn_app_with_features(features: FeatureSettings) -> TestApp {
    Lazy::force(&TRACING);

    let mut configuration = get_configuration().expect("Failed to read configuration.");
    configuration.features = features;

    let users = UserStore::new();
    let test_user = TestUser::generate();
    users
        .register(
            &test_user.username,
            Secret::new(test_user.password.clone()),
            true,
        )
        .await
        .expect("Failed to register the test user.");

    let app = run(&configuration, users.clone());

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap()
    });

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        users,
        test_user,
        api_client,
    }
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login(&self) -> reqwest::Response {
        self.post_login_with(&self.test_user.username, &self.test_user.password)
            .await
    }

    pub async fn post_login_with(&self, username: &str, password: &str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/login", &self.address))
            .form(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_logout(&self) -> reqwest::Response {
        self.api_client
            .post(format!("{}/logout", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_dashboard(&self) -> reqwest::Response {
        self.get("/dashboard").await
    }

    pub async fn get_login_html(&self) -> String {
        self.get("/login")
            .await
            .text()
            .await
            .expect("Failed to read response body.")
    }
}

pub fn assert_is_redirect_to(response: &reqwest::Response, location: &str) {
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers().get("Location").unwrap(), location);
}

/// Pulls the hidden `_token` field out of a rendered form.
pub fn extract_csrf_token(html: &str) -> String {
    let marker = r#"name="_token" value=""#;
    let start = html.find(marker).expect("anti-forgery token field missing") + marker.len();
    let end = start + html[start..].find('"').expect("unterminated token field");
    html[start..end].to_string()
}

/// The session cookie set by a response, if any, as a (name, value) pair.
pub fn session_cookie(response: &reqwest::Response) -> Option<(String, String)> {
    response
        .cookies()
        .find(|cookie| cookie.name() == account_portal::startup::SESSION_COOKIE_NAME)
        .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
}
