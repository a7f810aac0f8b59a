use std::net::SocketAddr;
use std::sync::Arc;

use syllabus_core::config_file::load_config;
use syllabus_core::{ChatCompletionsClient, ServiceConfig};
use syllabus_pdf_mupdf::MupdfBackend;

mod app;
mod handlers;
mod models;
mod state;
mod upload;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServiceConfig::from_env(&load_config());
    tracing::debug!(?config, "resolved configuration");
    if config.llm_api_token.is_none() {
        tracing::warn!("HF_TOKEN not set, question generation requests will be rejected upstream");
    }

    let generator = ChatCompletionsClient::from_config(&config)?;
    let state = Arc::new(AppState::new(
        Arc::new(MupdfBackend::new()),
        Arc::new(generator),
    ));

    let app = app::router(state, config.max_upload_mb * 1024 * 1024);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("syllabus_web=info,syllabus_core=info,syllabus_parsing=info,syllabus_pdf_mupdf=info")
    });

    fmt().with_env_filter(env_filter).with_target(false).init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
