//! relnotes release notes service.
//!
//! Main entry point. Loads configuration, serves `/markdown` and
//! coordinates graceful shutdown on CTRL+C or SIGTERM.

use anyhow::{Context, Result};
use relnotes_api::{shutdown_signal, start_server, Config};
use tracing_subscriber::EnvFilter;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    init_tracing(&config)?;

    info!("Starting relnotes service");

    let addr = config.parse_server_addr()?;
    info!(
        server_addr = %addr,
        response_encoding = %config.response_encoding,
        max_body_bytes = config.max_body_bytes,
        request_timeout_secs = config.request_timeout,
        "Configuration loaded"
    );

    let shutdown = CancellationToken::new();
    let mut server = tokio::spawn(start_server(
        config.app_state(),
        addr,
        config.request_timeout(),
        shutdown.clone().cancelled_owned(),
    ));

    tokio::select! {
        () = shutdown_signal() => {
            shutdown.cancel();
        },
        result = &mut server => {
            // Server stopped without being asked to: bind or accept failure.
            let outcome = result.context("HTTP server task panicked")?;
            if let Err(e) = &outcome {
                error!(error = %e, "Error from HTTP server");
            }
            return outcome.context("HTTP server failed");
        },
    }

    match server.await {
        Ok(Ok(())) => {},
        Ok(Err(e)) => error!(error = %e, "Error shutting down HTTP server"),
        Err(e) => error!(error = %e, "HTTP server task panicked during shutdown"),
    }

    info!("relnotes shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
///
/// `RUST_LOG` wins over the configured `log_level`. An unparsable
/// `RUST_LOG` falls back to `log_level` and is reported once logging is up.
fn init_tracing(config: &Config) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let (filter, rejected_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(e) => {
            let rejected = std::env::var(EnvFilter::DEFAULT_ENV).ok().map(|value| (value, e));
            (config.log_filter()?, rejected)
        },
    };

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()?;

    if let Some((value, e)) = rejected_env {
        warn!(
            rust_log = %value,
            error = %e,
            log_level = %config.log_level,
            "Ignoring invalid RUST_LOG"
        );
    }

    Ok(())
}
