use poll_backend::{config::AppConfig, rocket_from_figment, store::open_store};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("🚀 Starting poll server");

    let figment = rocket::Config::figment();
    let config = AppConfig::from_figment(&figment)?;
    let store = open_store(&config).await?;

    rocket_from_figment(figment, store.clone()).launch().await?;
    store.close().await;

    info!("Poll server stopped");
    Ok(())
}
