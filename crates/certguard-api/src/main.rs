use certguard_api::setup;
use certguard_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // .env is optional; env vars set by the environment win.
    dotenvy::dotenv().ok();

    setup::telemetry::init_telemetry();

    let config = Config::from_env()?;

    let (_state, router) = setup::initialize_app(config.clone()).await?;

    setup::server::start_server(&config, router).await?;

    Ok(())
}
