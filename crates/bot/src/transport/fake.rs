//! Fake — in-memory chat transport that records every delivery.

use std::collections::HashSet;
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::auth::Identity;
use crate::transport::chat::{ChatTransport, CommandContext, DeliveryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryKind {
    Notify,
    Reply,
}

/// One attempted delivery, successful or not.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub kind: DeliveryKind,
    pub chat_id: Identity,
    pub text: String,
    pub at: Instant,
    pub delivered: bool,
}

/// Records deliveries in order. Recipients marked as failing get a
/// [`DeliveryError`] but are still recorded.
#[derive(Default)]
pub struct RecordingChat {
    deliveries: Mutex<Vec<Delivery>>,
    failing: HashSet<Identity>,
    latency: Option<Duration>,
}

impl RecordingChat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every delivery to `id`.
    pub fn failing_for(mut self, id: Identity) -> Self {
        self.failing.insert(id);
        self
    }

    /// Sleep this long before each delivery completes.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().await.clone()
    }

    pub async fn replies(&self) -> Vec<Delivery> {
        self.of_kind(DeliveryKind::Reply).await
    }

    pub async fn notifications(&self) -> Vec<Delivery> {
        self.of_kind(DeliveryKind::Notify).await
    }

    async fn of_kind(&self, kind: DeliveryKind) -> Vec<Delivery> {
        self.deliveries.lock().await
            .iter()
            .filter(|d| d.kind == kind)
            .cloned()
            .collect()
    }

    async fn deliver(&self, kind: DeliveryKind, chat_id: Identity, text: &str) -> Result<(), DeliveryError> {
        let at = Instant::now();
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let delivered = !self.failing.contains(&chat_id);
        self.deliveries.lock().await.push(Delivery {
            kind,
            chat_id,
            text: text.to_string(),
            at,
            delivered,
        });
        if delivered {
            Ok(())
        } else {
            Err(DeliveryError::Api(format!("chat {} unreachable", chat_id)))
        }
    }
}

impl ChatTransport for RecordingChat {
    fn notify<'a>(&'a self, recipient: Identity, text: &'a str) -> BoxFuture<'a, Result<(), DeliveryError>> {
        self.deliver(DeliveryKind::Notify, recipient, text).boxed()
    }

    fn reply<'a>(&'a self, ctx: &'a CommandContext, text: &'a str) -> BoxFuture<'a, Result<(), DeliveryError>> {
        self.deliver(DeliveryKind::Reply, ctx.chat_id, text).boxed()
    }
}
