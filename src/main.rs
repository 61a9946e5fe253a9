//! Arena Duel - headless match runner
//!
//! Runs one scripted round in the standard arena and prints the final
//! match stats as JSON. Useful for soak-testing the simulation and for
//! watching the event stream with `RUST_LOG=debug`.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arena_duel::config::Config;
use arena_duel::harness::{self, DemoPilot};
use arena_duel::world::ArenaWorld;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;
    config.match_config().validate()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    info!("Starting Arena Duel");
    info!(
        frame_rate = config.frame_rate,
        win_score = config.win_score,
        seed = config.match_seed,
        max_frames = config.max_frames,
        "Configuration loaded"
    );

    let mut world = ArenaWorld::standard();
    let mut pilot = DemoPilot::new();
    let report = harness::run(&config, &mut world, &mut pilot, shutdown_signal()).await;

    info!(frames = report.frames, stop = ?report.stop, "Run complete");
    println!("{}", serde_json::to_string_pretty(&report.stats)?);

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, stopping match");
        }
        _ = terminate => {
            info!("Received terminate signal, stopping match");
        }
    }
}
