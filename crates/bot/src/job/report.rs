use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::report::{format_report, UNAVAILABLE_REPORT};
use crate::state::{BotState, SharedState};

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// False when there was nobody to report to and the runtime was not queried.
    pub queried: bool,
    pub runtime_ok: bool,
    pub delivered: usize,
    pub failed: usize,
}

/// Background task that pushes a container report to every recipient on a timer.
///
/// The first tick fires after the configured startup delay so the chat
/// transport has time to connect. Later ticks are fixed-rate: each one is
/// scheduled one interval after the previous tick's start, so slow deliveries
/// do not push the schedule back. Missed ticks are skipped rather than burst.
///
/// A runtime failure still produces a report (the fixed unavailable text);
/// a failed delivery is logged and left for the next tick. Cancelling the
/// token stops the loop and drops any in-flight delivery.
pub async fn periodic_report(state: SharedState, cancel: CancellationToken) {
    let period = state.config.report_interval();
    let startup_delay = state.config.report_startup_delay();
    info!(
        "Starting periodic reporter (interval: {}s, first report in {}s, recipients: {})",
        period.as_secs(),
        startup_delay.as_secs(),
        state.gate.recipients().len()
    );
    if state.gate.recipients().is_empty() {
        warn!("No report recipients configured - periodic reports will not be sent");
    }

    let Some(first_tick) = Instant::now().checked_add(startup_delay) else {
        error!("Report startup delay of {}s is out of range - periodic reports disabled",
            startup_delay.as_secs());
        return;
    };
    let mut interval = time::interval_at(first_tick, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut tick_count: u64 = 0;
    let mut consecutive_failures: u32 = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }
        tick_count = tick_count.saturating_add(1);

        let outcome = tokio::select! {
            _ = cancel.cancelled() => {
                info!("Shutdown during report tick #{} - abandoning pending deliveries", tick_count);
                break;
            }
            outcome = report_tick(&state) => outcome,
        };

        if !outcome.queried {
            continue;
        }
        if outcome.runtime_ok {
            consecutive_failures = 0;
        } else {
            consecutive_failures = consecutive_failures.saturating_add(1);
            if consecutive_failures >= 3 {
                warn!("Docker has been unavailable for {} consecutive reports - check daemon health",
                    consecutive_failures);
            }
        }
        info!(
            "Report tick #{}: delivered={}, failed={}",
            tick_count, outcome.delivered, outcome.failed
        );
    }

    info!("Periodic reporter stopped after {} ticks", tick_count);
}

/// Run one reporting cycle: query the runtime once, format, notify each recipient.
pub async fn report_tick(state: &BotState) -> TickOutcome {
    let recipients = state.gate.recipients();
    if recipients.is_empty() {
        debug!("Report tick skipped: no recipients");
        return TickOutcome::default();
    }

    let (text, runtime_ok) = compose_report(state, state.config.runtime_timeout()).await;
    let mut outcome = TickOutcome {
        queried: true,
        runtime_ok,
        ..TickOutcome::default()
    };

    for &recipient in recipients {
        match state.chat.notify(recipient, &text).await {
            Ok(()) => outcome.delivered += 1,
            Err(e) => {
                outcome.failed += 1;
                warn!(recipient, "Failed to deliver periodic report: {}", e);
            }
        }
    }
    outcome
}

/// The report text, and whether the runtime answered in time.
async fn compose_report(state: &BotState, timeout: Duration) -> (String, bool) {
    match time::timeout(timeout, state.runtime.list_containers(true)).await {
        Ok(Ok(summaries)) => (format_report(&summaries), true),
        Ok(Err(e)) => {
            error!("Docker list_containers failed during report: {}", e);
            (UNAVAILABLE_REPORT.to_string(), false)
        }
        Err(_) => {
            warn!("Docker daemon timeout after {:?} during report", timeout);
            (UNAVAILABLE_REPORT.to_string(), false)
        }
    }
}
