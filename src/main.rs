use repurpose::{app, app_state::AppState, config::Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("repurpose=info,tower_http=info")),
        )
        .init();

    // Missing credentials are a startup failure, never a per-request one.
    let config = Config::from_env().expect("Failed to load configuration");
    let state = AppState::new(&config);
    let app = app::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .expect("Failed to bind to address");
    tracing::info!(addr = %config.bind_addr(), "listening");
    axum::serve(listener, app).await.unwrap();
}
