use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sol_gateway::{api, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration; a missing BIRDEYE_API_KEY stops here
    let config = Config::from_env()?;
    info!("Starting in {:?} mode", config.app_env);
    info!("Solana RPC: {}", config.solana_rpc_url);

    // Bind first so a bad HOST/PORT fails before anything else is built
    let listener = api::router::bind_listener(&config).await?;

    // Build our application with routes
    let app = api::router::create_router(config)?;

    // Run our application
    info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
