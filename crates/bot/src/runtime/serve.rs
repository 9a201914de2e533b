//! Serve — spawn the periodic reporter and run the command loop until shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::command::{Command, CommandDispatcher};
use crate::conf::BotConfig;
use crate::job;
use crate::runtime::stop::shutdown_signal;
use crate::state::SharedState;
use crate::transport::TelegramClient;

/// Base delay after a failed getUpdates call; grows linearly up to `MAX_POLL_BACKOFF_STEPS`.
const POLL_BACKOFF: Duration = Duration::from_secs(2);
const MAX_POLL_BACKOFF_STEPS: u32 = 15;

/// Start the reporter task, then poll for commands until a shutdown signal arrives.
pub async fn serve(
    state: SharedState,
    telegram: Arc<TelegramClient>,
    config: BotConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let cancel = CancellationToken::new();

    let reporter = tokio::spawn(job::periodic_report(Arc::clone(&state), cancel.child_token()));

    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_cancel.cancel();
    });

    let dispatcher = CommandDispatcher::new(Arc::clone(&state));

    let bot_username = match telegram.get_me().await {
        Ok(username) => username,
        Err(e) => {
            warn!("getMe failed, commands addressed to other bots will also be handled: {}", e);
            None
        }
    };

    info!("");
    info!("========================================");
    info!("dockbot is ready!");
    info!("Report interval: {}s", config.report_interval_secs);
    info!("Long-poll timeout: {}s", config.poll_timeout_secs);
    if let Some(username) = &bot_username {
        info!("Bot username: @{}", username);
    }
    info!("Press Ctrl+C to shutdown gracefully");
    info!("========================================");
    info!("");

    poll_commands(&telegram, &dispatcher, bot_username.as_deref(), config.poll_timeout(), &cancel).await;

    cancel.cancel();
    if let Err(e) = reporter.await {
        error!("Periodic reporter task failed: {}", e);
    }

    info!("Bot shutdown complete");
    Ok(())
}

/// Inbound loop: long-poll Telegram, dispatch each command in arrival order.
///
/// With `bot_username` set, commands addressed to another bot are skipped.
///
/// Commands are handled one at a time on this task; the reporter runs on its
/// own task, so neither can starve the other.
pub async fn poll_commands(
    telegram: &TelegramClient,
    dispatcher: &CommandDispatcher,
    bot_username: Option<&str>,
    poll_timeout: Duration,
    cancel: &CancellationToken,
) {
    let mut offset: i64 = 0;
    let mut consecutive_failures: u32 = 0;

    loop {
        let result = tokio::select! {
            _ = cancel.cancelled() => break,
            result = telegram.get_updates(offset, poll_timeout) => result,
        };

        let updates = match result {
            Ok(updates) => {
                consecutive_failures = 0;
                updates
            }
            Err(e) => {
                consecutive_failures = consecutive_failures.saturating_add(1);
                let backoff = POLL_BACKOFF * consecutive_failures.min(MAX_POLL_BACKOFF_STEPS);
                warn!("getUpdates failed (attempt {}), retrying in {:?}: {}",
                    consecutive_failures, backoff, e);
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(backoff) => continue,
                }
            }
        };

        for update in updates {
            offset = offset.max(update.update_id.saturating_add(1));
            let Some((ctx, text)) = update.text_message() else {
                continue;
            };
            let Some(command) = Command::parse_addressed(text, ctx.chat_id, bot_username) else {
                continue;
            };
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Command loop stopped");
                    return;
                }
                _ = dispatcher.handle(&ctx, &command) => {}
            }
        }
    }

    info!("Command loop stopped");
}
