mod config;
mod handlers;
mod models;
mod server;
mod services;

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;

use config::Config;
use handlers::AnalyzeHandler;
use server::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables (RUST_LOG included)
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("🚀 Starting Diet Coach API...");

    let config = Arc::new(Config::from_env()?);

    if config.groq_configured() {
        log::info!("✅ Groq configured with model: {}", config.groq_model);
    } else {
        log::info!("ℹ️ GROQ_API_KEY not set, Groq provider disabled");
    }
    log::info!("🦙 Ollama at {} with model: {}", config.ollama_url, config.ollama_model);
    match config.llm_timeout {
        Some(timeout) => log::info!("⏱️ LLM calls time out after {:?}", timeout),
        None => log::warn!("⚠️ LLM_TIMEOUT_SECS not set, LLM calls have no timeout"),
    }

    let client = config.http_client()?;
    let coach = Arc::new(services::build_coach_chain(&config, client));
    log::info!("✅ Coach chain: {:?} then local fallback", coach.provider_kinds());

    let analyze_handler = Arc::new(AnalyzeHandler::new(coach));
    let app = create_router(analyze_handler, config.clone());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    log::info!("🌐 Diet API running on http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    log::info!("🛑 Shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("❌ Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
