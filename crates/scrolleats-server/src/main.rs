mod api;
mod middleware;
mod upstream;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, rate_limit_state_from_config, AppState},
    upstream::UpstreamClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = scrolleats_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let upstream = UpstreamClient::new(
        &config.upstream_base_url,
        config.google_places_api_key.clone(),
        config.request_timeout_secs,
    )?;
    if !upstream.has_key() {
        if matches!(config.env, scrolleats_core::Environment::Development) {
            tracing::warn!("GOOGLE_PLACES_API_KEY is not set; upstream calls will be rejected");
        } else {
            anyhow::bail!("GOOGLE_PLACES_API_KEY is required outside development");
        }
    }

    let app = build_app(
        AppState {
            upstream: Arc::new(upstream),
        },
        rate_limit_state_from_config(&config),
        config.static_dir.as_deref(),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        env = %config.env,
        static_dir = ?config.static_dir,
        "scrolleats proxy listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
