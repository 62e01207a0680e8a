use storefront_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment first so config sees the .env overrides
    dotenv::dotenv().ok();

    let config = Config::from_env();
    setup_environment(&config)?;

    tracing::info!("Foodify storefront server starting...");

    let state = ServerState::initialize(&config)?;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
