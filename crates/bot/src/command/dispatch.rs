//! Dispatch — authorization, runtime action, and the single reply per command.

use tracing::{info, warn};

use crate::client::RuntimeError;
use crate::command::model::{Command, CommandName, LifecycleAction};
use crate::report::{format_counts, format_listing};
use crate::state::SharedState;
use crate::transport::CommandContext;

pub const UNAUTHORIZED: &str = "Utente non autorizzato.";
pub const WELCOME: &str = "Bot attivo. Usa /list o /status";
pub const HELP: &str = "/list - elenca container\n\
/status - riepilogo\n\
/restart <name> - riavvia container\n\
/stop <name> - ferma container";
pub const RUNTIME_UNAVAILABLE: &str = "Docker SDK non disponibile o non accessibile.";

/// Maps inbound commands to runtime operations. Stateless across commands.
pub struct CommandDispatcher {
    state: SharedState,
}

impl CommandDispatcher {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Run `command` and send exactly one reply to `ctx`.
    pub async fn handle(&self, ctx: &CommandContext, command: &Command) {
        let reply = self.respond(command).await;
        if let Err(e) = self.state.chat.reply(ctx, &reply).await {
            warn!(chat_id = ctx.chat_id, command = %command.name, "Failed to deliver reply: {}", e);
        }
    }

    /// Compute the reply text for `command`. Every path yields one string.
    pub async fn respond(&self, command: &Command) -> String {
        if !self.state.gate.is_allowed(command.sender) {
            warn!(sender = command.sender, command = %command.name, "Rejected command from unauthorized sender");
            return UNAUTHORIZED.to_string();
        }

        info!(sender = command.sender, command = %command.name, args = ?command.args, "Handling command");

        match command.name {
            CommandName::Start => WELCOME.to_string(),
            CommandName::Help => HELP.to_string(),
            CommandName::List => self.list().await,
            CommandName::Status => self.status().await,
            CommandName::Restart => self.lifecycle(LifecycleAction::Restart, &command.args).await,
            CommandName::Stop => self.lifecycle(LifecycleAction::Stop, &command.args).await,
        }
    }

    async fn list(&self) -> String {
        match self.state.runtime.list_containers(true).await {
            Ok(summaries) => format_listing(&summaries),
            Err(RuntimeError::Unavailable(detail)) => {
                warn!("Docker unavailable while listing containers: {}", detail);
                RUNTIME_UNAVAILABLE.to_string()
            }
            Err(e) => format!("Errore leggendo Docker: {}", e),
        }
    }

    /// Both counts come from one enumeration, so `running <= total` holds.
    async fn status(&self) -> String {
        match self.state.runtime.list_containers(true).await {
            Ok(summaries) => {
                let running = summaries.iter().filter(|c| c.is_running()).count();
                format_counts(running, summaries.len())
            }
            Err(RuntimeError::Unavailable(detail)) => {
                warn!("Docker unavailable while counting containers: {}", detail);
                RUNTIME_UNAVAILABLE.to_string()
            }
            Err(e) => format!("Errore: {}", e),
        }
    }

    async fn lifecycle(&self, action: LifecycleAction, args: &[String]) -> String {
        let Some(target) = args.first() else {
            return action.usage().to_string();
        };

        let runtime = &self.state.runtime;
        let handle = match runtime.get_container(target).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!(container = %target, %action, "Container lookup failed: {}", e);
                return format!("Errore: {}", e);
            }
        };

        let result = match action {
            LifecycleAction::Restart => runtime.restart(&handle).await,
            LifecycleAction::Stop => runtime.stop(&handle).await,
        };

        match result {
            Ok(()) => {
                info!(container = %target, id = %handle.id, %action, "Container action completed");
                action.done(target)
            }
            Err(e) => {
                warn!(container = %target, %action, "Container action failed: {}", e);
                format!("Errore: {}", e)
            }
        }
    }
}
