//! Diagnostics go through `tracing`; this installs the stderr subscriber.

use tracing_subscriber::{EnvFilter, fmt};

/// Level from `-v` count, falling back to the configured level.
pub fn level_for(verbosity: u8, configured: &str) -> String {
    match verbosity {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// `RUST_LOG` wins; otherwise our crates log at `level` and everything else at `warn`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,reledger={level},reledger_core={level},reledger_ingest={level},reledger_ledger={level}"
        ))
    })
}

/// Install the subscriber. If one is already set (tests, embedding), keep it.
pub fn init_logging(level: &str) {
    if let Err(err) = fmt()
        .with_env_filter(build_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
    {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
}
