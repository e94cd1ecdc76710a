use hrms_lite::{ApiClient, AppState, Config, router};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    info!(api_base = %config.api_base, "using HRMS backend");
    if config.api_base_defaulted {
        warn!(
            api_base = %config.api_base,
            "HRMS_API_URL is unset; API calls go back to this server, which serves no /api routes"
        );
    }

    let state = AppState::new(ApiClient::new(config.api_base.clone()));
    let app = router(state);

    let addr = config.bind_addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
