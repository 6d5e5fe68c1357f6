//! FFPR Narrator - Replay harness
//!
//! Replays a recorded hook trace through the narration engine and prints what
//! would have been spoken. `!` marks interrupting speech, `+` queued speech.
//!
//! Usage: `ffpr-narrator [trace.jsonl]`

use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use ffpr_narrator::infrastructure::config::AppConfig;
use ffpr_narrator::infrastructure::state::NarratorState;
use ffpr_narrator::infrastructure::trace::{load_trace, TraceRecord};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ffpr_narrator=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?.with_trace_arg(std::env::args().nth(1));
    let replay_id = Uuid::new_v4();
    tracing::info!(%replay_id, "Starting FFPR Narrator replay");
    tracing::info!("  Trace: {}", config.trace_path.display());
    tracing::info!("  Frame interval: {}ms", config.frame_interval_ms);

    let records = load_trace(&config.trace_path).await?;
    tracing::info!("Loaded {} trace records", records.len());

    let state = NarratorState::new(config).await?;

    tokio::select! {
        result = replay(&state, &records) => {
            result?;
            tracing::info!(%replay_id, "Replay finished");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received, stopping replay");
        }
    }

    Ok(())
}

async fn replay(state: &NarratorState, records: &[TraceRecord]) -> anyhow::Result<()> {
    let mut pacing = match state.config.frame_interval_ms {
        0 => None,
        ms => Some(tokio::time::interval(Duration::from_millis(ms))),
    };

    for record in records {
        let frames = state.apply(record)?;
        for _ in 0..frames {
            if let Some(interval) = pacing.as_mut() {
                interval.tick().await;
            }
            state.frame();
        }
    }
    Ok(())
}
