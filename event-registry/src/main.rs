use event_registry::{AppState, Config, build_app, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    init_logger_with_file(
        config.log_level.as_deref(),
        config.log_json,
        config.log_dir.as_deref(),
    )?;

    tracing::info!(
        environment = %config.environment,
        enforce_unique_code = config.registration.enforce_unique_code,
        "Starting event-registry"
    );

    let state = AppState::new(&config).await?;
    let app = build_app(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("event-registry HTTP listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("event-registry stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
