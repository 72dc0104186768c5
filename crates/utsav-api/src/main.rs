use utsav_api::setup;
use utsav_core::Config;

// Use mimalloc as the global allocator for better performance and lower
// fragmentation, especially when running on musl-based systems inside
// containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    setup::telemetry::init_telemetry();

    // Load configuration
    let config = Config::from_env()?;

    // Build services and routes
    let state = setup::build_state(config.clone()).await?;
    let router = setup::build_router(state)?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}
