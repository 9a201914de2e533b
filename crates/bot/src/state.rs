//! Bot state — everything the command loop and the reporter share.

use std::sync::Arc;

use crate::auth::{AllowList, AuthorizationGate};
use crate::client::SharedRuntime;
use crate::conf::BotConfig;
use crate::transport::SharedChat;

/// Read-only after boot. The runtime and chat handles are internally thread-safe.
pub struct BotState {
    pub config: BotConfig,
    pub gate: AuthorizationGate,
    pub runtime: SharedRuntime,
    pub chat: SharedChat,
}

impl BotState {
    pub fn new(config: BotConfig, runtime: SharedRuntime, chat: SharedChat) -> Self {
        let gate = AuthorizationGate::new(AllowList::parse(&config.allowed_identities));
        Self { config, gate, runtime, chat }
    }
}

pub type SharedState = Arc<BotState>;
