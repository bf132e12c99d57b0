use game_catalog::config::{config_path, Environment, Settings};
use game_catalog::server::{build_app, connect_store, run};
use game_catalog::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let environment = Environment::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(environment.default_log_filter())),
        )
        .init();

    let path = config_path();
    let settings = Settings::load(&path, environment)?;
    tracing::info!(config = %path, settings = ?settings, "settings loaded");

    let store = connect_store(&settings).await?;
    let app = build_app(AppState::new(store), &settings);
    run(&settings, app).await?;
    Ok(())
}
