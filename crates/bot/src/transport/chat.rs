//! Chat — outbound operations the core calls back into.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::auth::Identity;

#[derive(Error, Debug)]
pub enum DeliveryError {
    /// Build through `without_url()`: request URLs carry the bot token.
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),
    #[error("chat API error: {0}")]
    Api(String),
}

/// Where the reply to an inbound command goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandContext {
    pub chat_id: Identity,
    pub message_id: i64,
}

/// Outbound half of a chat backend.
pub trait ChatTransport: Send + Sync {
    /// Push an unsolicited message to `recipient`.
    fn notify<'a>(&'a self, recipient: Identity, text: &'a str) -> BoxFuture<'a, Result<(), DeliveryError>>;

    /// Answer the command that produced `ctx`.
    fn reply<'a>(&'a self, ctx: &'a CommandContext, text: &'a str) -> BoxFuture<'a, Result<(), DeliveryError>>;
}

pub type SharedChat = Arc<dyn ChatTransport>;
