//! Fake — test double for the runtime facade.
//!
//! Provides a deterministic [`FakeRuntime`] that implements [`RuntimeOps`]
//! using in-memory state, with call counters and failure injection so the
//! dispatcher and reporter can be tested without a Docker daemon.

use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::sync::Mutex;

use crate::client::error::RuntimeError;
use crate::client::runtime::RuntimeOps;
use crate::docker::inventory::{ContainerHandle, ContainerStatus, ContainerSummary};

/// A lifecycle action recorded by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeAction {
    Restart(String),
    Stop(String),
}

#[derive(Default)]
struct Inner {
    containers: Vec<ContainerSummary>,
    actions: Vec<FakeAction>,
}

/// A fake runtime for deterministic testing.
///
/// Containers keep insertion order, which stands in for the daemon's
/// enumeration order.
#[derive(Default)]
pub struct FakeRuntime {
    inner: Mutex<Inner>,
    list_error: Option<RuntimeError>,
    lookup_error: Option<RuntimeError>,
    action_error: Option<RuntimeError>,
    calls: AtomicUsize,
}

impl FakeRuntime {
    /// Create an empty fake runtime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a container.
    pub fn with_container(mut self, container: ContainerSummary) -> Self {
        self.inner.get_mut().containers.push(container);
        self
    }

    /// Make every `list_containers` call fail.
    pub fn failing_list(mut self, err: RuntimeError) -> Self {
        self.list_error = Some(err);
        self
    }

    /// Make every `get_container` call fail.
    pub fn failing_lookup(mut self, err: RuntimeError) -> Self {
        self.lookup_error = Some(err);
        self
    }

    /// Make every restart/stop fail after a successful lookup.
    pub fn failing_actions(mut self, err: RuntimeError) -> Self {
        self.action_error = Some(err);
        self
    }

    /// Shorthand for a runtime whose daemon is unreachable.
    pub fn unavailable() -> Self {
        let err = RuntimeError::Unavailable("daemon unreachable".to_string());
        Self::new()
            .failing_list(err.clone())
            .failing_lookup(err.clone())
            .failing_actions(err)
    }

    /// Total number of facade calls received, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn actions(&self) -> Vec<FakeAction> {
        self.inner.lock().await.actions.clone()
    }

    pub async fn status_of(&self, name: &str) -> Option<ContainerStatus> {
        self.inner.lock().await
            .containers
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.status)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    async fn transition(
        &self,
        handle: &ContainerHandle,
        action: FakeAction,
        status: ContainerStatus,
    ) -> Result<(), RuntimeError> {
        self.record_call();
        if let Some(err) = &self.action_error {
            return Err(err.clone());
        }
        let mut state = self.inner.lock().await;
        let container = state.containers
            .iter_mut()
            .find(|c| c.id == handle.id)
            .ok_or_else(|| RuntimeError::NotFound(handle.name.clone()))?;
        container.status = status;
        state.actions.push(action);
        Ok(())
    }
}

// ── RuntimeOps implementation ───────────────────────────────────

impl RuntimeOps for FakeRuntime {
    fn list_containers(
        &self,
        include_stopped: bool,
    ) -> BoxFuture<'_, Result<Vec<ContainerSummary>, RuntimeError>> {
        async move {
            self.record_call();
            if let Some(err) = &self.list_error {
                return Err(err.clone());
            }
            let state = self.inner.lock().await;
            Ok(state.containers
                .iter()
                .filter(|c| include_stopped || c.is_running())
                .cloned()
                .collect())
        }
        .boxed()
    }

    fn get_container<'a>(
        &'a self,
        name_or_id: &'a str,
    ) -> BoxFuture<'a, Result<ContainerHandle, RuntimeError>> {
        async move {
            self.record_call();
            if let Some(err) = &self.lookup_error {
                return Err(err.clone());
            }
            let state = self.inner.lock().await;
            state.containers
                .iter()
                .find(|c| c.name == name_or_id || (!name_or_id.is_empty() && c.id.starts_with(name_or_id)))
                .map(|c| ContainerHandle { id: c.id.clone(), name: c.name.clone() })
                .ok_or_else(|| RuntimeError::NotFound(name_or_id.to_string()))
        }
        .boxed()
    }

    fn restart<'a>(&'a self, handle: &'a ContainerHandle) -> BoxFuture<'a, Result<(), RuntimeError>> {
        self.transition(handle, FakeAction::Restart(handle.id.clone()), ContainerStatus::Running)
            .boxed()
    }

    fn stop<'a>(&'a self, handle: &'a ContainerHandle) -> BoxFuture<'a, Result<(), RuntimeError>> {
        self.transition(handle, FakeAction::Stop(handle.id.clone()), ContainerStatus::Exited)
            .boxed()
    }
}
