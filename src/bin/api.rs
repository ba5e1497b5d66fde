use financial_advisor_gateway::{api::start_server, GatewayConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GatewayConfig::from_env()?;

    info!("Financial Advisor Gateway - API Server");
    info!(
        port = config.port,
        seeded = config.mock_seed.is_some(),
        simulate_latency = config.simulate_latency,
        "Configuration loaded"
    );

    start_server(config).await?;

    Ok(())
}
