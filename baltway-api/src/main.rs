use std::net::SocketAddr;
use std::sync::Arc;

use baltway_api::{app, state::{AppState, AuthConfig}};
use baltway_api::auth::StaticCredentialVerifier;
use baltway_api::notify::TracingNotifier;
use baltway_api::route_preview::NullGeocoder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "baltway_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = baltway_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Baltway API on port {}", config.server.port);

    let db = baltway_store::DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let app_state = AppState {
        blog: Arc::new(baltway_store::PgBlogRepository::new(db.pool.clone())),
        settings: Arc::new(baltway_store::PgSettingsRepository::new(db.pool.clone())),
        notifier: Arc::new(TracingNotifier),
        geocoder: Arc::new(NullGeocoder),
        verifier: Arc::new(StaticCredentialVerifier::new(
            config.auth.admin_password.clone(),
        )),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
