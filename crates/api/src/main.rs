use anyhow::Context;

use bookshelf_api::{app, config, config::AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before logging init so RUST_LOG / LOG_FORMAT may come from the file.
    let env_file = config::load_env_file();
    bookshelf_observability::init();
    match env_file {
        Ok(Some(path)) => tracing::info!(path = %path.display(), "loaded .env file"),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "failed to load .env file"),
    }

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(?config, "configuration loaded");

    if config.secret_key.is_none() {
        tracing::warn!("SECRET_KEY not set; token signing is unavailable");
    }

    let store = app::services::build_store(&config)
        .await
        .context("failed to initialize book store")?;

    let router = app::build_app(store);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
