use std::net::SocketAddr;

use tower_http::trace::TraceLayer;

use account_portal::authentication::UserStore;
use account_portal::configuration::get_configuration;
use account_portal::startup::run;
use account_portal::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() {
    let subscriber = get_subscriber("account_portal".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");

    let users = UserStore::new();
    users
        .register(
            &configuration.bootstrap_user.username,
            configuration.bootstrap_user.password.clone(),
            true,
        )
        .await
        .expect("Failed to register the bootstrap user.");

    let app = run(&configuration, users).layer(TraceLayer::new_for_http());

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let socket: SocketAddr = address.parse().expect("Unable to parse socket address");
    axum::Server::bind(&socket)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
