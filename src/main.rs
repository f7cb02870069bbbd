use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use weather_dashboard::api::AppState;
use weather_dashboard::{DashboardConfig, HttpTransport, VERSION, WeatherServices, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = DashboardConfig::load().context("Failed to load configuration")?;
    telemetry::init(&config.logging)?;

    info!("Starting weather dashboard v{}", VERSION);

    let transport = HttpTransport::new(config.http.timeout())
        .context("Failed to build HTTP client")?;
    let services = WeatherServices::new(Arc::new(transport), &config);

    web::run(&config.server, AppState::new(services)).await
}
