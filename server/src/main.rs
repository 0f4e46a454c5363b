use anyhow::Error;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use bi_dashboard::config::load_config;
use bi_dashboard::routes::create_router;
use bi_dashboard::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Error> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    let server_address = config.server_address.clone();
    info!(
        users_file = %config.users_file.display(),
        sample_size = config.sample_size,
        "loaded config"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    info!("listening on http://{server_address}");
    axum::serve(listener, app).await?;

    Ok(())
}
