mod auth;
mod error;
mod handlers;
mod setup;
mod state;
mod telemetry;

use veriscan_core::Config;
use veriscan_extraction::check_api;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    telemetry::init_tracing();

    let (api_ok, api_msg) = check_api(&config);
    if !api_ok {
        tracing::warn!(message = %api_msg, "extraction API not fully configured; /upload will fail");
    }

    let (_state, router) = setup::initialize_app(config.clone()).await?;

    setup::server::start_server(&config, router).await?;

    Ok(())
}
