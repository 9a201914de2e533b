//! Boot — logging init, config load, Docker connection, state creation.

use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::live::DockerRuntime;
use crate::conf::BotConfig;
use crate::docker::client::DockerClient;
use crate::state::{BotState, SharedState};
use crate::transport::TelegramClient;

/// Initialise the tracing / logging subsystem.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load config, connect to Docker and Telegram, and build shared state.
///
/// Any configuration error ends the process here, before a task is spawned.
pub async fn boot() -> Result<(SharedState, Arc<TelegramClient>, BotConfig), Box<dyn std::error::Error>> {
    info!("Starting dockbot v{}", env!("CARGO_PKG_VERSION"));

    let config = BotConfig::load().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;
    info!(
        "Loaded configuration: report_interval={}s, startup_delay={}s, telegram_api={}",
        config.report_interval_secs, config.report_startup_delay_secs, config.telegram_api_base
    );

    info!(
        "Connecting to Docker daemon at: {}",
        if config.docker_socket.is_empty() {
            "default socket"
        } else {
            &config.docker_socket
        }
    );
    let docker = DockerClient::new(&config.docker_socket).map_err(|e| {
        error!("Failed to connect to Docker: {}", e);
        e
    })?;
    let runtime = Arc::new(DockerRuntime::new(docker, config.docker_stop_timeout_secs));

    let telegram = Arc::new(
        TelegramClient::new(&config.telegram_api_base, &config.auth_token, config.poll_timeout())
            .map_err(|e| {
                error!("Failed to build Telegram client: {}", e);
                e
            })?,
    );

    let state = Arc::new(BotState::new(config.clone(), runtime, telegram.clone()));
    if state.gate.is_open() {
        warn!("Allow list is empty: every chat may issue commands and no periodic reports will be sent");
    } else {
        info!("Authorized identities: {:?}", state.gate.recipients());
    }

    Ok((state, telegram, config))
}
