use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_dashboard::config::{Config, WeatherProvider};
use api_dashboard::dashboard::Dashboard;
use api_dashboard::fetcher::build_client;
use api_dashboard::routes::{self, AppState};

const DEFAULT_CONFIG_PATH: &str = "dashboard.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up OPENWEATHER_API_KEY and friends from a local .env, if any
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_dashboard=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path =
        std::env::var("DASHBOARD_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)?.with_env_overrides();
    info!(
        "Loaded configuration from {} ({} feeds, {} tickers)",
        config_path,
        config.news.feeds.len(),
        config.stocks.symbols.len()
    );
    if config.weather.provider == WeatherProvider::OpenWeather && config.weather.api_key.is_none()
    {
        warn!("OpenWeather selected but no API key set; the weather panel will be empty");
    }

    let client = build_client(Duration::from_secs(config.request_timeout_secs))?;

    let state = Arc::new(AppState {
        title: config.title.clone(),
        dashboard: Dashboard::new(client, &config),
    });

    let app = routes::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Server starting on http://{}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
