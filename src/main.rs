use anyhow::{Context, Result};
use clap::Parser;
use speech_relay::{create_router, AppState, Config, CredentialGate, NatsEngine};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "speech-relay", about = "Real-time audio to transcript relay")]
struct Args {
    /// Config file name (TOML, without extension)
    #[arg(long, default_value = "config/speech-relay")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v0.1.0", cfg.service.name);

    let gate = CredentialGate::new(cfg.auth.public_key.as_deref())
        .context("Failed to build credential gate")?;
    if !gate.has_key() {
        info!("No verification key configured; every connection will be refused");
    }

    let engine = NatsEngine::connect(&cfg.recognition.engine_url)
        .await
        .context("Failed to connect to recognition engine")?;

    let state = AppState::new(
        Arc::new(gate),
        Arc::new(engine),
        Arc::new(cfg.recognition.stream_template()),
        cfg.recognition.idle_timeout(),
    );

    let router = create_router(state, cfg.service.http.allowed_origin.as_deref());
    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router).await?;

    Ok(())
}
