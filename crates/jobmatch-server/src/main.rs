//! jobmatch HTTP server entrypoint.

use std::net::SocketAddr;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use jobmatch::MatchEngine;
use jobmatch::config::Config;
use jobmatch_server::gateway::{AppState, create_router_with_state};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
     _       _                     _       _
    (_) ___ | |__  _ __ ___   __ _| |_ ___| |__
    | |/ _ \| '_ \| '_ ` _ \ / _` | __/ __| '_ \
    | | (_) | |_) | | | | | | (_| | || (__| | | |
   _/ |\___/|_.__/|_| |_| |_|\__,_|\__\___|_| |_|
  |__/
        RESUME IN. RANKING OUT.
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        top_k = config.top_k,
        "jobmatch starting"
    );

    if config.encoder_stub {
        tracing::warn!("JOBMATCH_ENCODER_STUB is set, running encoder in stub mode");
    }

    let engine = tokio::task::spawn_blocking({
        let config = config.clone();
        move || MatchEngine::from_config(&config)
    })
    .await??;
    let engine = MatchEngine::install_global(engine);

    tracing::info!(
        encoder = engine.encoder().mode(),
        phrase_pipeline = %engine.phrases().mode(),
        "Models loaded"
    );

    let state = AppState::new(engine, config.max_upload_bytes);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("jobmatch shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("JOBMATCH_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
