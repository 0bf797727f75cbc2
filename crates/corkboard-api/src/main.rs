use corkboard_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    corkboard_api::setup::telemetry::init_telemetry();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (database, storage, routes)
    let (_state, router) = corkboard_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    corkboard_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
