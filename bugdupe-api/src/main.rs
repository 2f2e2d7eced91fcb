use tracing_subscriber::EnvFilter;

use bugdupe_api::{config::read_config, router};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let settings = read_config().expect("Failed to read configuration");
    let app = router::create(&settings);

    let address = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    );
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .expect("Failed to bind listener");

    tracing::info!("Server is running on {}", address);
    axum::serve(listener, app).await.expect("Server error");
}
