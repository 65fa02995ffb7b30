//! Quizzy Server
//!
//! HTTP front end for PDF text extraction and quiz generation.

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quizzy_server::config::Config;
use quizzy_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizzy_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting Quizzy Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        max_pages = config.extraction.max_pages,
        timeout_secs = config.extraction.timeout_secs,
        "Extraction settings"
    );
    tracing::info!(
        language = %config.ocr.language,
        dpi = config.ocr.dpi,
        workers = config.ocr.workers,
        "OCR settings"
    );

    let host = config.server.host.clone();
    let port = config.server.port;
    let app_state = AppState::new(config);

    let engine = app_state.pipeline().engine();
    if engine.is_available().await {
        tracing::info!("OCR engine '{}' is available", engine.name());
    } else {
        tracing::warn!(
            "OCR engine '{}' is not available, scanned PDFs will fail",
            engine.name()
        );
    }

    let app = quizzy_server::app(app_state);

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    tracing::info!("Quizzy Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
